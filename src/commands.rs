//! One-shot subcommands that print to a writer and exit.

use crate::api::{EventsQuery, Market, MarketApi, MarketsQuery, SeriesQuery, get_all_markets};
use crate::error::{Error, Result};
use crate::term::{
    AnsiColor, Align, BorderStyle, Style, TableOptions, color, highlight_json, rainbow, write_table,
};
use crate::ui::{Theme, market_headers};
use std::io::Write;

const HEADER_BORDER: &str = "#F01ADE";
const SECTION_TITLE: &str = "#04B575";

/// Walk the first series, its first open event and that event's liquid
/// markets, printing a table at each step.
pub async fn query<W: Write>(
    out: &mut W,
    api: &dyn MarketApi,
    category: &str,
    tags: &str,
) -> Result<()> {
    if category.trim().is_empty() || tags.trim().is_empty() {
        return Err(Error::invalid_input("category and tags must not be empty"));
    }
    let series = api.get_series(SeriesQuery::new(category, tags)).await?.series;

    let header = Style::new()
        .border(BorderStyle::Rounded)
        .border_foreground(HEADER_BORDER)
        .padding((1, 4))
        .width(40)
        .align(Align::Center)
        .render(&format!(
            "Fetching {} {category} - {tags} series...",
            color(&series.len().to_string(), "mint")
        ));
    writeln!(out, "{header}")?;

    let Some(first_series) = series.first() else {
        writeln!(out, "{}", color("No series found matching criteria.", AnsiColor::Red))?;
        return Ok(());
    };

    let headers = ["Ticker", "Title", "Category", "Tags"].map(|h| color(h, "mint"));
    let rows: Vec<Vec<String>> = series
        .iter()
        .map(|s| vec![s.ticker.clone(), s.title.clone(), s.category.clone(), s.tags.join(", ")])
        .collect();
    write_table(
        out,
        &headers,
        &rows,
        &TableOptions::new()
            .border(BorderStyle::Rounded)
            .border_color(HEADER_BORDER)
            .alternate_row_color("mint"),
    )?;

    writeln!(
        out,
        "\nSelected Series: {} ({})",
        color(&first_series.title, AnsiColor::Yellow),
        first_series.ticker
    )?;

    let events = api
        .get_events(EventsQuery::open_for_series(&first_series.ticker))
        .await?
        .events;
    writeln!(out, "Found {} open events.", color(&events.len().to_string(), "mint"))?;

    let Some(event) = events.first() else {
        writeln!(out, "{}", color("No open events found for this series.", AnsiColor::Red))?;
        return Ok(());
    };

    writeln!(
        out,
        "\nSelected Event: {} ({})",
        color(&event.title, AnsiColor::Yellow),
        event.event_ticker
    )?;
    let event_headers = [
        color("Event Ticker", AnsiColor::Cyan),
        color("Title", "mint"),
        color("Date", AnsiColor::Gray),
    ];
    let event_rows = vec![vec![
        event.event_ticker.clone(),
        event.title.clone(),
        event.strike_date.clone().unwrap_or_else(|| "N/A".to_string()),
    ]];
    write_table(
        out,
        &event_headers,
        &event_rows,
        &TableOptions::new()
            .border(BorderStyle::Rounded)
            .border_color(AnsiColor::Yellow),
    )?;

    writeln!(out, "\nFetching markets for event: {}...", event.event_ticker)?;
    let markets = get_all_markets(api, MarketsQuery::for_event(&event.event_ticker)).await?;
    if markets.is_empty() {
        writeln!(out, "{}", color("No markets found for this event.", AnsiColor::Red))?;
        return Ok(());
    }

    let liquid: Vec<&Market> = markets.iter().filter(|m| m.has_liquidity()).collect();
    writeln!(
        out,
        "Found {} total markets. Showing {} with liquidity.",
        color(&markets.len().to_string(), "mint"),
        color(&liquid.len().to_string(), "mint")
    )?;

    if liquid.is_empty() {
        writeln!(
            out,
            "{}",
            color("No markets with liquidity found for this event.", AnsiColor::Yellow)
        )?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = liquid.iter().map(|m| full_market_row(m)).collect();
    write_table(
        out,
        &market_headers(&Theme::default()),
        &rows,
        &TableOptions::new()
            .border(BorderStyle::Rounded)
            .border_color(AnsiColor::Cyan)
            .alternate_row_color("darkGray"),
    )?;

    Ok(())
}

/// Like the browser's market row, but with full timestamps.
fn full_market_row(market: &Market) -> Vec<String> {
    let or_na = |t: &Option<String>| t.clone().unwrap_or_else(|| "N/A".to_string());
    vec![
        market.short_ticker().to_string(),
        market.title.clone(),
        market.yes_bid.to_string(),
        market.yes_ask.to_string(),
        market.last_price.to_string(),
        market.liquidity.to_string(),
        market.volume.to_string(),
        or_na(&market.open_time),
        or_na(&market.close_time),
    ]
}

/// Fetch the balance with the configured credentials.
pub async fn check_auth<W: Write>(out: &mut W, api: &dyn MarketApi) -> Result<()> {
    writeln!(out, "Checking authentication...")?;
    let balance = api.get_balance().await?;
    writeln!(
        out,
        "{} Balance: ${}",
        color("Success!", AnsiColor::Green),
        balance.dollars()
    )?;
    Ok(())
}

/// Print the exchange status as highlighted JSON.
pub async fn status<W: Write>(out: &mut W, api: &dyn MarketApi) -> Result<()> {
    let status = api.get_exchange_status().await?;
    let value = serde_json::to_value(&status)?;
    writeln!(out, "{}", highlight_json(&value, 2))?;
    Ok(())
}

/// Styling showcase; touches no network.
pub fn demo<W: Write>(out: &mut W) -> Result<()> {
    let section = |title: &str, first: bool| {
        let style = Style::new().foreground(SECTION_TITLE).bold();
        let style = if first { style } else { style.margin_top(1) };
        style.render(title)
    };

    writeln!(out, "{}", section("--- Example 1: Basic Styling ---", true))?;
    let simple = Style::new()
        .foreground("#802922")
        .background("#00BFAE")
        .padding((0, 2))
        .margin((0, 1));
    writeln!(out, "{}", simple.render("Hello, Kalshi Terminal!"))?;

    writeln!(out, "{}", section("--- Example 2: Borders and Alignment ---", false))?;
    let boxed = Style::new()
        .border(BorderStyle::Rounded)
        .border_foreground(HEADER_BORDER)
        .padding((1, 4))
        .width(40)
        .align(Align::Center);
    writeln!(out, "{}", boxed.render("This text is centered\ninside a magenta box."))?;

    writeln!(
        out,
        "{}",
        section("--- Example 3: Table with Manual Content Styling ---", false)
    )?;
    let headers = ["ID", "MARKET", "PROBABILITY"]
        .map(|h| Style::new().foreground(SECTION_TITLE).bold().render(h));
    let rows = vec![
        vec!["1".to_string(), "Will it rain today?".to_string(), color("15%", 31u8)],
        vec!["2".to_string(), "Will Bitcoin hit $100k?".to_string(), color("85%", 32u8)],
        vec!["3".to_string(), "Will AI take over?".to_string(), color("50%", 33u8)],
    ];
    write_table(
        out,
        &headers,
        &rows,
        &TableOptions::new()
            .border(BorderStyle::Rounded)
            .border_color("#30BFEB"),
    )?;

    writeln!(out, "{}", section("--- Example 4: Margin and Padding Demo ---", false))?;
    let inner = Style::new()
        .background("#FF5F00")
        .foreground("#FFFFFF")
        .padding((1, 2))
        .render("Inner Content");
    let outer = Style::new()
        .border(BorderStyle::Rounded)
        .padding(1)
        .margin(1)
        .render(&inner);
    writeln!(out, "{outer}")?;

    writeln!(out, "{}", section("--- Example 5: Colors ---", false))?;
    writeln!(out, "{}", rainbow("Prediction markets, in color", 0.3))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        Balance, Event, EventsResponse, ExchangeStatus, MarketsResponse, MockMarketApi, Series,
        SeriesResponse,
    };
    use crate::error::Error;
    use crate::term::strip_ansi;

    fn plain(out: &[u8]) -> String {
        strip_ansi(&String::from_utf8_lossy(out))
    }

    fn weather_api(markets: Vec<Market>) -> MockMarketApi {
        let mut api = MockMarketApi::new();
        api.expect_get_series().returning(|_| {
            Ok(SeriesResponse {
                series: vec![Series {
                    ticker: "KXHIGHNY".to_string(),
                    title: "Highest temperature in NYC".to_string(),
                    category: "Climate and Weather".to_string(),
                    tags: vec!["Daily temperature".to_string()],
                    ..Series::default()
                }],
            })
        });
        api.expect_get_events().returning(|_| {
            Ok(EventsResponse {
                events: vec![Event {
                    event_ticker: "KXHIGHNY-24DEC01".to_string(),
                    title: "NYC high on Dec 1".to_string(),
                    ..Event::default()
                }],
                cursor: None,
            })
        });
        api.expect_get_markets().returning(move |_| {
            Ok(MarketsResponse {
                markets: markets.clone(),
                cursor: None,
            })
        });
        api
    }

    #[tokio::test]
    async fn test_query_rejects_blank_filters() {
        let mut api = MockMarketApi::new();
        api.expect_get_series().never();

        let mut out = Vec::new();
        let err = query(&mut out, &api, "Climate and Weather", "  ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_query_walks_series_events_and_markets() {
        let api = weather_api(vec![
            Market {
                ticker: "KXHIGHNY-24DEC01-T45".to_string(),
                liquidity: 1200,
                open_time: Some("2024-11-30T15:00:00Z".to_string()),
                ..Market::default()
            },
            Market {
                ticker: "KXHIGHNY-24DEC01-T50".to_string(),
                ..Market::default()
            },
        ]);

        let mut out = Vec::new();
        query(&mut out, &api, "Climate and Weather", "Daily temperature")
            .await
            .unwrap();
        let text = plain(&out);

        assert!(text.contains("Selected Series: Highest temperature in NYC (KXHIGHNY)"));
        assert!(text.contains("Found 1 open events."));
        assert!(text.contains("Selected Event: NYC high on Dec 1 (KXHIGHNY-24DEC01)"));
        assert!(text.contains("Found 2 total markets. Showing 1 with liquidity."));
        assert!(text.contains("T45"));
        assert!(text.contains("2024-11-30T15:00:00Z"));
        assert!(!text.contains("T50"));
    }

    #[tokio::test]
    async fn test_query_without_liquid_markets() {
        let api = weather_api(vec![Market::default()]);
        let mut out = Vec::new();
        query(&mut out, &api, "Climate and Weather", "Daily temperature")
            .await
            .unwrap();
        assert!(plain(&out).contains("No markets with liquidity found for this event."));
    }

    #[tokio::test]
    async fn test_query_without_series() {
        let mut api = MockMarketApi::new();
        api.expect_get_series()
            .returning(|_| Ok(SeriesResponse::default()));
        api.expect_get_events().never();

        let mut out = Vec::new();
        query(&mut out, &api, "Sports", "Golf").await.unwrap();
        let text = plain(&out);
        assert!(text.contains("Fetching 0 Sports - Golf series..."));
        assert!(text.contains("No series found matching criteria."));
    }

    #[tokio::test]
    async fn test_check_auth_prints_dollars() {
        let mut api = MockMarketApi::new();
        api.expect_get_balance()
            .returning(|| Ok(Balance { balance: 12345 }));

        let mut out = Vec::new();
        check_auth(&mut out, &api).await.unwrap();
        assert!(plain(&out).contains("Success! Balance: $123.45"));
    }

    #[tokio::test]
    async fn test_check_auth_propagates_failure() {
        let mut api = MockMarketApi::new();
        api.expect_get_balance()
            .returning(|| Err(Error::api(401, "Unauthorized")));

        let mut out = Vec::new();
        let err = check_auth(&mut out, &api).await.unwrap_err();
        assert_eq!(err.to_string(), "Kalshi API error [401]: Unauthorized");
    }

    #[tokio::test]
    async fn test_status_prints_json() {
        let mut api = MockMarketApi::new();
        api.expect_get_exchange_status().returning(|| {
            Ok(ExchangeStatus {
                exchange_active: true,
                trading_active: false,
            })
        });

        let mut out = Vec::new();
        status(&mut out, &api).await.unwrap();
        let text = plain(&out);
        assert!(text.contains("\"exchange_active\": true"));
        assert!(text.contains("\"trading_active\": false"));
    }

    #[test]
    fn test_demo_needs_no_network() {
        let mut out = Vec::new();
        demo(&mut out).unwrap();
        let text = plain(&out);
        assert!(text.contains("Hello, Kalshi Terminal!"));
        assert!(text.contains("Will Bitcoin hit $100k?"));
        assert!(text.contains("Inner Content"));
    }
}
