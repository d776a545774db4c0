pub mod forecast;
pub mod health;
pub mod map;
pub mod neighbourhoods;
pub mod trend;
