use std::process;
use std::sync::Arc;

use gateway::{
    Api, ChippTransport, FileSessionStore, RequestGateway, RouteState, SignOut, LOGIN_ROUTE,
};
use log::{error, info, warn};
use monitor::{Command, Dashboard, Result};

#[tokio::main]
async fn main() {
    pretty_env_logger::init_timed();

    if let Err(err) = run().await {
        error!("{err}");
        eprintln!("{err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let base_url =
        std::env::var("ECOGUARD_URL").unwrap_or("http://10.0.2.2:8080".to_string());
    let session_path =
        std::env::var("ECOGUARD_SESSION").unwrap_or("./session.json".to_string());

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let command = Command::parse(&args)?;

    let store = Arc::new(FileSessionStore::new(session_path));
    let routes = RouteState::new("/");
    let mut route_changes = routes.subscribe();

    let transport = ChippTransport::new(base_url.as_str())?;
    let sign_out = SignOut::new(store.clone(), routes.clone());
    let gateway = RequestGateway::new(Arc::new(transport), store, Arc::new(sign_out));

    info!("using backend {base_url}");

    let dashboard = Dashboard::new(Api::new(gateway, routes.clone()), routes.clone());
    let result = dashboard.run(command).await;

    if route_changes.has_changed().unwrap_or(false) {
        let route = route_changes.borrow_and_update().clone();

        if route == LOGIN_ROUTE {
            warn!("redirected to sign-in");
        } else {
            info!("route is now {route}");
        }
    }

    result
}
