pub mod dispatch;
pub mod doctor;
pub mod init;
pub mod policy;
pub mod routes;
pub mod schema;
pub mod servers;
pub mod validate;
