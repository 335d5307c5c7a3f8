use anyhow::Result;
use superform_plugins::format_title;

pub fn run(title: String) -> Result<()> {
    println!("{}", format_title(&title));
    Ok(())
}
