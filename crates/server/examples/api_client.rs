//! Walks through the bookshelf API against a running server
//!
//! Start the server first: `cargo run -p bookshelf-server`

use reqwest::Client;
use serde_json::{json, Value};

const SERVER_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("2. Create a Book:");
    let book: Value = client
        .post(format!("{SERVER_URL}/api/books"))
        .json(&json!({ "title": "The Dispossessed" }))
        .send()
        .await?
        .json()
        .await?;
    println!("Body: {book}");
    println!();

    // A string body means there is no book to work with
    let Some(id) = book["_id"].as_str() else {
        anyhow::bail!("server did not return a book: {book}");
    };

    println!("3. Create a Book Without a Title:");
    let resp = client
        .post(format!("{SERVER_URL}/api/books"))
        .json(&json!({ "title": "" }))
        .send()
        .await?;
    println!("Body: {}", resp.text().await?);
    println!();

    println!("4. Add a Comment (form-encoded):");
    let resp = client
        .post(format!("{SERVER_URL}/api/books/{id}"))
        .form(&[("comment", "An ambiguous utopia")])
        .send()
        .await?;
    println!("Body: {}", resp.text().await?);
    println!();

    println!("5. List Books:");
    let resp = client.get(format!("{SERVER_URL}/api/books")).send().await?;
    println!("Body: {}", resp.text().await?);
    println!();

    println!("6. Delete the Book:");
    let resp = client
        .delete(format!("{SERVER_URL}/api/books/{id}"))
        .send()
        .await?;
    println!("Body: {}", resp.text().await?);
    println!();

    println!("7. Fetch the Deleted Book:");
    let resp = client
        .get(format!("{SERVER_URL}/api/books/{id}"))
        .send()
        .await?;
    println!("Body: {}", resp.text().await?);
    println!();

    println!("All examples completed!");
    Ok(())
}
