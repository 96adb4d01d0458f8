//! Print the address book OpenAPI document as JSON.

use address_book::ApiDoc;
use color_eyre::eyre::Result;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let document = ApiDoc::openapi().to_pretty_json()?;
    println!("{document}");
    Ok(())
}
