mod command;
mod record;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
