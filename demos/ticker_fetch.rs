//! Ticker Fetch Example
//!
//! Fetches the current NASDAQ-100 ticker list, retrying the network call
//! and falling back to the bundled list if the scrape fails. Requires the
//! `tickers` feature:
//!
//! ```sh
//! cargo run --example ticker_fetch --features tickers
//! ```

use ebbtide::tickers;

fn main() {
    let symbols = tickers::nasdaq100_tickers();

    println!("got {} tickers", symbols.len());
    for chunk in symbols.chunks(10) {
        println!("  {}", chunk.join(" "));
    }
}
