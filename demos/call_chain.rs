//! Three-service call chain rendered as a sequence diagram model
//!
//! This example records a request that fans through three services, then prints the
//! sequence notation, the wire transcripts, and the final status badge. The render model is
//! handed to a closure renderer that serializes it to JSON, the way a page template would
//! consume it.
//!
//! Run with: RUST_LOG=debug cargo run --example call_chain

use http_sequence::prelude::*;
use tracing_subscriber::EnvFilter;

fn post(uri: &str, body: &str) -> std::result::Result<HttpRequest, http::Error> {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Some(Body::from(body)))
}

fn reply(status: u16, body: &str) -> std::result::Result<HttpResponse, http::Error> {
    http::Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Some(Body::from(body)))
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut diagram = Diagram::new()
        .title("Sign up")
        .subtitle("web -> accounts -> mailer")
        .name("call_chain")
        .meta_json(r#"{"build": "local"}"#)
        .request("web", "accounts", post("/x", r#"{"email":"a@b.com"}"#)?)
        .request("accounts", "mailer", post("/y", r#"{"template":"welcome"}"#)?)
        .response("mailer", "accounts", reply(200, r#"{"queued":true}"#)?)
        .response("accounts", "web", reply(201, r#"{"id":42}"#)?);

    let model = diagram.render_model()?;

    println!("Sequence notation");
    println!("=================");
    print!("{}", model.notation);
    println!();

    for (index, entry) in model.transcripts.iter().enumerate() {
        println!("--- ({}) ---", index + 1);
        print!("{}", entry.header);
        if !entry.body.is_empty() {
            println!("{}", entry.body);
        }
    }
    println!();
    println!("Final status: {} [{}]", model.status_code, model.badge_class);

    let json = diagram.render(&|model: RenderModel| -> Result<String> {
        Ok(serde_json::to_string_pretty(&model)?)
    })?;
    println!();
    println!("{}", json);

    Ok(())
}
