//! User Endpoint Handlers
//!
//! - **`signup`** - POST /api/users/signup
//! - **`login`** - POST /api/users/login
//! - **`logout`** - GET /api/users/logout
//! - **`current`** - GET /api/users/current
//! - **`subscription`** - PATCH /api/users
//! - **`verify`** - GET /api/users/verify/{token}, POST /api/users/verify
//! - **`avatar`** - PATCH /api/users/avatars
//! - **`types`** - shared request/response DTOs

pub mod avatar;
pub mod current;
pub mod login;
pub mod logout;
pub mod signup;
pub mod subscription;
pub mod types;
pub mod verify;

pub use avatar::update_avatar;
pub use current::current;
pub use login::login;
pub use logout::logout;
pub use signup::signup;
pub use subscription::update_subscription;
pub use verify::{resend_verification, verify_email};
