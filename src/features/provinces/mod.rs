//! Province management: the top level of the store hierarchy.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/provinces` | Create province |
//! | GET | `/api/provinces` | List active provinces (paginated) |
//! | GET | `/api/provinces/{id}` | Get province by id |
//! | PUT | `/api/provinces/{id}` | Update province |
//! | DELETE | `/api/provinces/{id}` | Soft-delete province |
//! | GET | `/api/provinces/search` | Search provinces by name |
//! | GET | `/api/provinces/search/stores` | Stores of a province plus whitelisted stores |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProvinceService;
