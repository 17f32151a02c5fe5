mod app;

fn main() {
    app::common::create_app_helper().launch_app_with_args(std::env::args_os());
}
