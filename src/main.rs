use env_logger::Env;

fn main() {
    let env = Env::default().filter_or("ARBITER_LOG", "warn");
    env_logger::Builder::from_env(env).init();

    println!("arbiter v{}", env!("CARGO_PKG_VERSION"));

    let mut console = arbiter::console::Console::default();
    console.run();
}
