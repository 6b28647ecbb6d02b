mod command;
mod score_log;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
