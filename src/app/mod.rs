// Application layer: the client's pages, each mounting one view over the remote API.

pub mod pages;
