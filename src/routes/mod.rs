mod crawled_data_route;
mod dashboard_route;
mod health_check_route;

pub use crawled_data_route::*;
pub use dashboard_route::*;
pub use health_check_route::*;
