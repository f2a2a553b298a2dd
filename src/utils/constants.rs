/// Clave de localStorage con el bearer token
pub const TOKEN_STORAGE_KEY: &str = "token";

pub const AUTH_LOGIN_PATH: &str = "/auth/login";
pub const AUTH_REGISTER_PATH: &str = "/auth/register";
pub const POSITIONS_PATH: &str = "/positions";

pub const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed";
pub const POSITIONS_LOAD_FAILED_MESSAGE: &str = "Failed to load positions";
pub const POSITION_CREATE_FAILED_MESSAGE: &str = "Failed to create position";
pub const POSITION_UPDATE_FAILED_MESSAGE: &str = "Failed to update position";
pub const POSITION_DELETE_FAILED_MESSAGE: &str = "Failed to delete position";
