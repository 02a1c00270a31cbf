pub mod cors;
pub mod router;
pub mod routes;
