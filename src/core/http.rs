use std::time::Duration;

use reqwest::{
    blocking::{
        Client,
        Response,
    },
    header::USER_AGENT,
};
use serde::de::DeserializeOwned;

use crate::core::FlashcardError;

const MAX_ATTEMPTS: usize = 2;

pub fn http_client() -> Result<Client, FlashcardError> {
    Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .map_err(|e| FlashcardError::Custom(format!("HTTP client build failed: {e}")))
}

/// GETs `url` and decodes the body as JSON, retrying transport failures once.
pub fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FlashcardError> {
    let mut attempts: usize = 0;
    loop {
        attempts += 1;

        let resp = client.get(url).header(USER_AGENT, "flashcards/0.1 (+reqwest)").send();

        let resp = match resp {
            Ok(r) => r,
            Err(e) => {
                if attempts < MAX_ATTEMPTS {
                    log::warn!("GET {} failed ({}), retrying", url, e);
                    std::thread::sleep(Duration::from_secs(attempts as u64));
                    continue;
                }
                return Err(e.into());
            }
        };

        ensure_success(&resp)?;
        return Ok(resp.json::<T>()?);
    }
}

fn ensure_success(resp: &Response) -> Result<(), FlashcardError> {
    if !resp.status().is_success() {
        return Err(FlashcardError::HttpStatus {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
