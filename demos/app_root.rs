//! Boots the application root against the in-memory host, performs two navigations and a manual
//! tracking call, then prints every gtag command that would have reached the page.
//!
//! Set `ANALYTICS_PRODUCTION=true` to see the environment gate keep analytics off, or
//! `GOOGLE_ANALYTICS_ID=G-...` to change the site identifier.

use std::sync::Arc;

use gtag_route_analytics::analytics::{Analytics, AnalyticsSettings, DataLayer, MemoryDocument};
use gtag_route_analytics::app::{AppEnvironment, AppRoot};
use gtag_route_analytics::router::{RouteNode, Router, RouterState};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut environment = AppEnvironment::load();
    if environment.google_analytics_id.is_empty() {
        environment.google_analytics_id = "G-1234567890".into();
    }

    let layer = Arc::new(DataLayer::new());
    let document = Arc::new(MemoryDocument::new("https://demo.example/"));
    let router = Arc::new(Router::new());
    let analytics = Analytics::new(
        AnalyticsSettings::new(environment.google_analytics_id.clone()),
        layer.clone(),
        document.clone(),
        router.clone(),
    );
    let root = AppRoot::new(environment, analytics);
    println!("{}: init -> {:?}", root.title(), root.on_init());

    document.set_location("https://demo.example/shop");
    router.navigate(
        "/shop",
        "/shop",
        RouterState::from_chain([RouteNode::new(""), RouteNode::new("shop").with_title("Shop")]),
    )?;
    document.set_location("https://demo.example/shop/cart");
    router.navigate(
        "/cart",
        "/shop/cart",
        RouterState::from_chain([
            RouteNode::new(""),
            RouteNode::new("shop").with_title("Shop"),
            RouteNode::new("cart").with_title("Cart"),
        ]),
    )?;
    root.track_event()?;

    for script in document.head_scripts() {
        println!("<script async={}> src={:?}", script.is_async, script.src);
    }
    println!("document.title = {:?}", document.snapshot().title);
    for command in layer.snapshot().commands {
        println!("gtag{:?}", command.to_arguments());
    }
    Ok(())
}
