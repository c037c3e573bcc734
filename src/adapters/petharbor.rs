use crate::domain::model::PetRecord;
use crate::domain::ports::{HttpTransport, PetSource};
use crate::utils::error::{PetError, Result};
use crate::utils::text::capitalize;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

pub const DEFAULT_ENDPOINT: &str = "http://petharbor.com/petoftheday.asp";
const SOURCE: &str = "PetHarbor";

static SCRIPT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^document\.write\s*\(""#).expect("valid regex"));

static LEADING_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?P<name>\w+)\s+").expect("valid regex"));

static FEMALE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)female").expect("valid regex"));

/// Fetches the "pet of the day" from a PetHarbor shelter.
pub struct PetHarborSource<T: HttpTransport> {
    transport: T,
    endpoint: String,
    shelter_id: String,
    pet_types: Vec<String>,
}

impl<T: HttpTransport> PetHarborSource<T> {
    /// `pet_types` is a whitespace separated list such as `"dog cat"`.
    pub fn new(transport: T, shelter_id: impl Into<String>, pet_types: &str) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            shelter_id: shelter_id.into(),
            pet_types: parse_pet_types(pet_types),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn pet_types(&self) -> &[String] {
        &self.pet_types
    }

    fn pick_pet_type(&self) -> Result<String> {
        self.pet_types
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| PetError::ConfigError {
                message: "petharbor pet type list is empty".to_string(),
            })
    }

    fn query(&self, pet_type: String) -> Vec<(&'static str, String)> {
        vec![
            // PetHarbor 要求 shelter id 外面包單引號
            ("shelterlist", format!("'{}'", self.shelter_id)),
            ("type", pet_type),
            ("availableonly", "1".to_string()),
            ("showstat", "1".to_string()),
            ("source", "results".to_string()),
        ]
    }
}

#[async_trait]
impl<T: HttpTransport> PetSource for PetHarborSource<T> {
    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch_one(&self) -> Result<PetRecord> {
        let pet_type = self.pick_pet_type()?;
        tracing::info!(
            shelter = %self.shelter_id,
            pet_type = %pet_type,
            "Requesting pet of the day from PetHarbor"
        );

        let response = self.transport.get(&self.endpoint, &self.query(pet_type)).await?;

        if !response.is_success() {
            tracing::warn!("PetHarbor returned status {}", response.status);
            return Err(PetError::upstream(SOURCE, response.status));
        }
        tracing::debug!(body = %response.body, "Raw PetHarbor response");

        let markup = descript(&response.body);
        let record = parse_document(&markup)?;
        tracing::info!(name = %record.name, "Built PetHarbor record");
        Ok(record)
    }
}

pub fn parse_pet_types(list: &str) -> Vec<String> {
    list.split_whitespace().map(str::to_string).collect()
}

/// Strip the `document.write("...");` wrapper PetHarbor puts around its markup.
/// Bodies without the wrapper come back unchanged.
pub fn descript(body: &str) -> String {
    let without_prefix = SCRIPT_PREFIX.replace_all(body, "");
    without_prefix.replace("\");", "")
}

/// Extract a `PetRecord` from de-scripted PetHarbor markup.
pub fn parse_document(markup: &str) -> Result<PetRecord> {
    let document = Html::parse_document(markup);

    let cells: Vec<String> = document
        .select(&selector("td")?)
        .map(|cell| cell.text().collect::<String>())
        .collect();
    if cells.len() < 4 {
        return Err(PetError::parse(
            SOURCE,
            format!("expected at least 4 table cells, found {}", cells.len()),
        ));
    }

    let anchor = document
        .select(&selector("a")?)
        .next()
        .ok_or_else(|| PetError::parse(SOURCE, "no anchor element in response"))?;

    let href = anchor
        .value()
        .attr("href")
        .ok_or_else(|| PetError::parse(SOURCE, "anchor has no href"))?;
    let detail_link = unescape_link(href);

    // 圖片 SRC 在腳本裡也被跳脫成 \"...\"
    let picture_url = anchor
        .select(&selector("img")?)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(unescape_link)
        .filter(|src| !src.is_empty())
        .ok_or_else(|| PetError::parse(SOURCE, "anchor has no img SRC"))?;

    let name = LEADING_WORD
        .captures(&cells[1])
        .map(|caps| capitalize(&caps["name"]))
        .ok_or_else(|| PetError::parse(SOURCE, "no pet name in second table cell"))?;

    Ok(PetRecord {
        picture_url: Some(picture_url),
        detail_link,
        name,
        description: cells[3].to_lowercase(),
    })
}

/// Guess the sex from free text. Not used for the record's description.
pub fn detect_sex(text: &str) -> &'static str {
    if FEMALE.is_match(text) {
        "female"
    } else {
        "male"
    }
}

fn unescape_link(href: &str) -> String {
    href.replace("\\\"", "").replace('\\', "")
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| PetError::parse(SOURCE, format!("bad selector {}: {}", css, e)))
}
