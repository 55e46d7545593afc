//! Loan listing example for the WoodCore SDK
//!
//! Fetches one loan account, then walks every page of active loans.
//!
//! To run this example:
//! ```bash
//! export WOODCORE_API_KEY="wc_test_..."
//! export WOODCORE_BASE_URL="http://localhost:8080"  # Optional, defaults to the key's environment
//! cargo run --example list_loans -- 42
//! ```

use futures::StreamExt;
use woodcore_sdk::{Params, WoodCore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = WoodCore::from_env()?;
    println!(
        "Environment: {} ({})\n",
        client.environment().as_str(),
        client.base_url()
    );

    let loans = client.loans();

    if let Some(loan_account_id) = std::env::args().nth(1) {
        println!("=== Loan account {loan_account_id} ===\n");
        let loan = loans
            .retrieve_loan_account(Params::new().with("loanAccountId", loan_account_id))
            .await?;
        println!("{}\n", serde_json::to_string_pretty(&loan)?);
    }

    println!("=== Active loans ===\n");
    let mut pages = loans.retrieve_all_loan_account_pages(
        Params::new().with("status", "active").with("perPage", 20),
    )?;

    let mut page_number = 0;
    while let Some(page) = pages.next().await {
        let page = page?;
        page_number += 1;
        let rows = page["data"]["data"].as_array().map_or(0, Vec::len);
        println!("Page {page_number}: {rows} loans");
    }

    Ok(())
}
