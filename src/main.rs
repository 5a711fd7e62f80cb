use tokio::net::TcpListener;

use plainwiki::logger::Logger;
use plainwiki::{router, AppState, Config, PageStore, TemplateComponent, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("logger already initialised: {}", e);
    }

    let config = Config::from_env();
    std::fs::create_dir_all(&config.data_dir)?;

    let templates = TemplateComponent::load(&config.template_dir);
    let store = PageStore::new(config.data_dir.clone());
    log::info!("Serving pages from {:?}", store.data_dir());
    let app = router(AppState::new(store, templates));

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr.as_str()).await?;
    log::info!("Wiki listening on http://{}", addr);
    axum::serve(listener, app).await.map_err(WikiError::from)
}
