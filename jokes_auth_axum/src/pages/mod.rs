mod login;
mod logout;
mod router;

pub(super) use router::router;
