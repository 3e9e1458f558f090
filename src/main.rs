use anyhow::Result;

fn main() -> Result<()> {
    ridgeline::ui::run()
}
