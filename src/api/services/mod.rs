pub mod geo;
pub mod health;
pub mod phishing;
pub mod whois;

pub use geo::geo_routes;
pub use health::health_routes;
pub use phishing::phishing_routes;
pub use whois::whois_routes;
