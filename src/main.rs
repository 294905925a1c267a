use friend_service::api;
use friend_service::common::init;
use friend_service::settings::AppSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::get();
    init::initialize_logging(settings);
    match settings.app_component.as_str() {
        "api" => api::serve(settings).await,
        "migrate" => init::migrate(settings).await,
        _ => panic!("Unknown app component"),
    }
}
