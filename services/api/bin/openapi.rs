use clinsim_api::router::ApiDoc;
use utoipa::OpenApi;

/// Writes the generated OpenAPI specification to a file, defaulting to
/// `openapi.json` in the working directory.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());
    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&path, spec_json)?;
    println!("OpenAPI spec written to {path}");
    Ok(())
}
