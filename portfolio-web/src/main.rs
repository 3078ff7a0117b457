mod clock;
mod config;
mod contact;
mod effects;
mod hooks;
mod market;
mod notifications;
mod playground;
mod routes;
mod sections;
mod terminal;
mod terminal_shell;
mod theme;
mod wallet;

fn main() {
    dioxus::launch(routes::App);
}
