mod cookie;
mod redirect;
mod session;
mod token;

pub use redirect::{login_redirect_location, validate_url};
pub use session::{
    create_session, destroy_session, get_session_user_id, get_user, require_session_user_id,
};
