use secrecy::SecretString;
use tally_api::{Client, DEFAULT_BASE_URL, Request, TallyApiError};

#[tokio::main]
pub async fn main() -> Result<(), TallyApiError> {
    let token = SecretString::from("api_token".to_string());
    let client = Client::new(DEFAULT_BASE_URL, &token);

    let req = Request::categories().with_user("me@example.com").list();

    let res = client.send(req).await?;
    for category in res.data {
        println!("{} ({} subcategories)", category.name, category.children.len());
    }
    Ok(())
}
