use clap::Parser;
use easytips_client::app::pages::auth::{LoginForm, RegisterForm};
use easytips_client::app::pages::driver::{AssignmentAction, AssignmentPage, FeedPage, IntentForm, OfferForm};
use easytips_client::app::pages::shipper::{EditServiceForm, NewServiceForm, ServiceOffersPage};
use easytips_client::config::{Command, DriverCommand, LogFormat, ShipperCommand};
use easytips_client::domain::model::{ServicePatch, ServiceQuery};
use easytips_client::domain::ports::{ConfigProvider, Page};
use easytips_client::utils::{logger, validation::Validate};
use easytips_client::{ApiClient, CliConfig, LocalStorage, Result, Route, Session, Settings, Shell, View};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    match run(config).await {
        Ok(view) => print!("{}", view),
        Err(e) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }
}

async fn run(config: CliConfig) -> Result<View> {
    let settings = Settings::load(&config.overrides(), config.config.as_deref())?;
    settings.validate()?;
    tracing::debug!("⚙️ API {} (storage {})", settings.api_url(), settings.storage_path());

    let api = ApiClient::from_config(&settings)?;
    let storage = LocalStorage::new(settings.storage_path());
    let session = Session::new(api, Arc::new(storage));
    let shell = Shell::new(session.clone(), Arc::new(settings.clone()));

    match config.command {
        Command::Open { path } => shell.open_path(&path).await,
        Command::Register {
            name,
            email,
            password,
            role,
        } => {
            RegisterForm {
                name,
                email,
                password,
                role,
            }
            .submit(&session)
            .await
        }
        Command::Login { email, password } => LoginForm::new(email, password).submit(&session).await,
        Command::Logout => {
            session.logout()?;
            Ok(View::new("Logout").redirect(Route::Home))
        }
        Command::Me => {
            let user = session.api().me(&session.token()?).await?;
            Ok(View::new(user.name)
                .line(format!("#{} {}", user.id, user.email))
                .line(format!("perfil: {}", user.role))
                .link("Dashboard", Route::Dashboard))
        }
        Command::Shipper(command) => shipper(&shell, command).await,
        Command::Driver(command) => driver(&shell, &settings, command).await,
    }
}

async fn shipper(shell: &Shell, command: ShipperCommand) -> Result<View> {
    let session = shell.session();
    match command {
        ShipperCommand::Services => shell.open(Route::ShipperServices).await,
        ShipperCommand::New(args) => {
            let form = NewServiceForm {
                title: args.title,
                description: args.description,
                service_type: args.service_type,
                origin_address: args.origin,
                origin_lat: args.origin_lat,
                origin_lng: args.origin_lng,
                dest_address: args.dest,
                dest_lat: args.dest_lat,
                dest_lng: args.dest_lng,
                offered_price: args.price,
            };
            form.submit(session).await
        }
        ShipperCommand::Offers { service_id } => shell.open(Route::ShipperService(service_id)).await,
        ShipperCommand::Accept {
            service_id,
            offer_id,
        } => ServiceOffersPage::new(service_id).accept(session, offer_id).await,
        ShipperCommand::Edit {
            service_id,
            title,
            description,
            price,
        } => {
            EditServiceForm {
                service_id,
                patch: ServicePatch {
                    title,
                    description,
                    offered_price: price,
                },
            }
            .submit(session)
            .await
        }
    }
}

async fn driver(shell: &Shell, settings: &Settings, command: DriverCommand) -> Result<View> {
    let session = shell.session();
    match command {
        DriverCommand::Feed {
            near_lat,
            near_lng,
            radius_km,
        } => {
            let mut query = ServiceQuery::published();
            if let (Some(lat), Some(lng)) = (near_lat, near_lng) {
                query = query.near(lat, lng, radius_km);
            }
            FeedPage { query }.render(session).await
        }
        DriverCommand::Offer {
            service_id,
            kind,
            price,
            message,
        } => {
            let form = OfferForm {
                price,
                message,
                ..OfferForm::new(service_id)
            };
            form.send(session, kind).await
        }
        DriverCommand::Intent { address, lat, lng } => {
            let mut form = IntentForm::from_config(settings);
            if let Some(address) = address {
                form.address = address;
            }
            if let Some(lat) = lat {
                form.dest_lat = lat;
            }
            if let Some(lng) = lng {
                form.dest_lng = lng;
            }
            form.submit(session).await
        }
        DriverCommand::Assignment => AssignmentPage::from_config(settings).render(session).await,
        DriverCommand::Collect => {
            AssignmentPage::from_config(settings)
                .act(session, AssignmentAction::Collect)
                .await
        }
        DriverCommand::Deliver => {
            AssignmentPage::from_config(settings)
                .act(session, AssignmentAction::Deliver)
                .await
        }
    }
}
