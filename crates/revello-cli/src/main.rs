mod command;
mod model;
mod store;

fn main() -> anyhow::Result<()> {
    command::run()
}
