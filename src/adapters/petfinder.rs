use crate::domain::model::PetRecord;
use crate::domain::ports::{HttpTransport, PetSource};
use crate::utils::error::{PetError, Result};
use crate::utils::text::{capitalize, join_phrases};
use async_trait::async_trait;
use serde_json::Value;

pub const DEFAULT_ENDPOINT: &str = "http://api.petfinder.com/pet.getRandom";
const DETAIL_URL: &str = "https://www.petfinder.com/petdetail";
const SOURCE: &str = "PetFinder";

/// PetFinder 把每個值都包成 `{"$t": value}`
const LEAF_KEY: &str = "$t";

/// Fetches a random pet from a PetFinder shelter.
pub struct PetFinderSource<T: HttpTransport> {
    transport: T,
    endpoint: String,
    shelter_id: String,
    api_key: String,
}

impl<T: HttpTransport> PetFinderSource<T> {
    pub fn new(transport: T, shelter_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            shelter_id: shelter_id.into(),
            api_key: api_key.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("format", "json".to_string()),
            ("key", self.api_key.clone()),
            ("shelterid", self.shelter_id.clone()),
            ("output", "full".to_string()),
        ]
    }
}

#[async_trait]
impl<T: HttpTransport> PetSource for PetFinderSource<T> {
    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch_one(&self) -> Result<PetRecord> {
        tracing::info!(shelter = %self.shelter_id, "Requesting random pet from PetFinder");
        let response = self.transport.get(&self.endpoint, &self.query()).await?;

        if !response.is_success() {
            tracing::warn!("PetFinder returned status {}", response.status);
            return Err(PetError::upstream(SOURCE, response.status));
        }
        tracing::debug!(body = %response.body, "Raw PetFinder response");

        let record = parse_response(&response.body)?;
        tracing::info!(name = %record.name, "Built PetFinder record");
        Ok(record)
    }
}

/// Parse a `pet.getRandom` JSON body into a `PetRecord`.
pub fn parse_response(body: &str) -> Result<PetRecord> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| PetError::parse(SOURCE, format!("body is not JSON: {}", e)))?;

    let pet = json
        .pointer("/petfinder/pet")
        .filter(|pet| pet.is_object())
        .ok_or_else(|| PetError::parse(SOURCE, "missing petfinder.pet object"))?;

    let id = required_leaf(pet, "id")?;
    let name = capitalize(&required_leaf(pet, "name")?);
    if name.is_empty() {
        return Err(PetError::parse(SOURCE, "pet name is empty"));
    }
    let sex = required_leaf(pet, "sex")?;

    let description = join_phrases([
        pet.get("options").and_then(option_phrase),
        Some(sex_phrase(&sex).to_string()),
        pet.get("breeds").and_then(breed_phrase),
    ]);

    Ok(PetRecord {
        picture_url: photo_url(pet),
        detail_link: format!("{}/{}", DETAIL_URL, id),
        name,
        description,
    })
}

/// Unwrap a `{"$t": value}` leaf. Numbers are rendered as text.
pub fn leaf_text(value: &Value) -> Option<String> {
    match value.get(LEAF_KEY)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_leaf(pet: &Value, field: &str) -> Result<String> {
    pet.get(field)
        .and_then(leaf_text)
        .ok_or_else(|| PetError::parse(SOURCE, format!("missing pet.{}.$t", field)))
}

/// Third photo of `media.photos.photo`; anything shorter means no picture.
pub fn photo_url(pet: &Value) -> Option<String> {
    pet.pointer("/media/photos/photo")?
        .as_array()?
        .get(2)
        .and_then(leaf_text)
}

/// Vocabulary for PetFinder option codes. `None` means the code has no phrase worth showing.
pub fn option_adjective(code: &str) -> Option<&'static str> {
    match code {
        "housebroken" | "housetrained" => Some("house trained"),
        "noClaws" => Some("declawed"),
        "altered" => Some("altered"),
        "noDogs" | "noCats" | "noKids" | "hasShots" => None,
        _ => None,
    }
}

/// First option code that maps to a phrase, or the bare option text.
pub fn option_phrase(options: &Value) -> Option<String> {
    match options.get("option") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(leaf_text)
            .find_map(|code| option_adjective(&code))
            .map(str::to_string),
        Some(entry) => leaf_text(entry)
            .and_then(|code| option_adjective(&code))
            .map(str::to_string),
        None => leaf_text(options),
    }
}

pub fn sex_phrase(abbreviation: &str) -> &'static str {
    if abbreviation.eq_ignore_ascii_case("f") {
        "female"
    } else {
        "male"
    }
}

/// Single breed as-is; several breeds as `a/b mix`.
pub fn breed_phrase(breeds: &Value) -> Option<String> {
    match breeds.get("breed")? {
        Value::Array(entries) => {
            let names: Vec<&str> = entries
                .iter()
                .filter_map(Value::as_object)
                .flat_map(|entry| entry.values().filter_map(Value::as_str))
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(format!("{} mix", names.join("/")))
            }
        }
        entry => leaf_text(entry),
    }
}
