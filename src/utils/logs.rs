use tracing::Level;

pub fn setup_tracing(json: bool, level: Level) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // logs go to stderr so that stdout only carries catalog output.
        .with_writer(std::io::stderr);
    if json {
        builder.with_ansi(false).without_time().json().init();
    } else {
        builder.init();
    }
}
