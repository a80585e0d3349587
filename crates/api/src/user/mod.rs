mod get_me;
mod login_user;
mod refresh_token;
mod register_user;

use actix_web::web;
use get_me::get_me_controller;
use login_user::login_user_controller;
use refresh_token::refresh_token_controller;
use register_user::register_user_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users/register", web::post().to(register_user_controller));
    cfg.route("/users/login", web::post().to(login_user_controller));
    cfg.route(
        "/users/token/refresh",
        web::post().to(refresh_token_controller),
    );
    cfg.route("/users/me", web::get().to(get_me_controller));
}
