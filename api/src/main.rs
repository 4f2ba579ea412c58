use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{info, warn};

use rw_api::app;
use rw_api::config::AppConfig;
use rw_api::middleware::create_cors;
use rw_api::routes::AppState;

use rw_core::services::credentials::CredentialService;
use rw_core::services::notification::NotificationService;
use rw_core::services::{ItemService, StatsService, SwapService};

use rw_infra::auth::JwtCredentialService;
use rw_infra::database::{
    DatabasePool, MySqlItemRepository, MySqlSwapRepository, MySqlUserRepository,
};
use rw_infra::email::{MailApiNotifier, MockEmailNotifier};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting ReWear API Server");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Connect the database pool once at startup and inject it everywhere
    let pool = DatabasePool::connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("database setup failed: {}", e))?;
    if !pool.is_ready().await {
        warn!("database connected but not answering health checks yet");
    }

    // Repositories
    let users = Arc::new(MySqlUserRepository::new(pool.inner()));
    let items = Arc::new(MySqlItemRepository::new(pool.inner()));
    let swaps = Arc::new(MySqlSwapRepository::new(pool.inner()));

    // Notification sink: real mail API when configured, logging mock otherwise
    let notifier: Arc<dyn NotificationService> = if config.notification.is_configured() {
        match MailApiNotifier::new(config.notification.clone()) {
            Ok(mail_api) => Arc::new(mail_api),
            Err(error) => {
                warn!("mail API unavailable ({}), using mock sink", error);
                Arc::new(MockEmailNotifier::new())
            }
        }
    } else {
        info!("no mail API configured, notifications go to the log");
        Arc::new(MockEmailNotifier::new())
    };

    // Credential service (token verification only; issuance is external)
    let credentials: Arc<dyn CredentialService> =
        Arc::new(JwtCredentialService::new(users.clone(), &config.auth));

    // Services
    let app_state = web::Data::new(AppState {
        swap_service: SwapService::new(
            swaps.clone(),
            items.clone(),
            users.clone(),
            notifier.clone(),
        ),
        item_service: ItemService::new(items.clone(), users.clone(), notifier.clone()),
        stats_service: StatsService::new(users.clone(), items.clone(), swaps.clone()),
        users: users.clone(),
    });
    let credentials_data = web::Data::new(credentials);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(credentials_data.clone())
            .wrap(Logger::default())
            .wrap(create_cors(&server_config))
            .route("/health", web::get().to(app::health_check))
            .configure(
                app::configure_routes::<
                    MySqlSwapRepository,
                    MySqlItemRepository,
                    MySqlUserRepository,
                    dyn NotificationService,
                >,
            )
            .default_service(web::route().to(app::not_found))
    })
    .keep_alive(std::time::Duration::from_secs(config.server.keep_alive))
    .bind(&bind_address)?;

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;
    Ok(())
}
