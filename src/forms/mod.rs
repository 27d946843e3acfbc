/// 폼 입력 검증
/// 요청 본문은 문자열 필드로만 받고, 여기서 도메인 값으로 변환한다.
/// 누락된 필드도 역직렬화 오류가 아닌 필드 오류로 돌려주기 위해 모든 필드는 기본값을 가진다.
// region:    --- Imports
use crate::auction::model::NewAuction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
// endregion: --- Imports

const REQUIRED: &str = "This field is required.";

pub const TITLE_MAX_LEN: usize = 120;
pub const DESCRIPTION_MAX_LEN: usize = 220;
pub const IMAGE_URL_MAX_LEN: usize = 600;

// region:    --- Form Errors
/// 필드 -> 메시지
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<&'static str, String> {
        self.0
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}
// endregion: --- Form Errors

// region:    --- Field Helpers
fn required<'a>(errors: &mut FormErrors, field: &'static str, value: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
    value
}

fn max_len(errors: &mut FormErrors, field: &'static str, value: &str, max: usize) {
    let len = value.chars().count();
    if len > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {len})."),
        );
    }
}

fn amount(errors: &mut FormErrors, field: &'static str, value: &str) -> i64 {
    let value = required(errors, field, value);
    if value.is_empty() {
        return 0;
    }
    match value.parse::<i64>() {
        Ok(n) if n >= 0 => n,
        Ok(_) => {
            errors.add(field, "Ensure this value is greater than or equal to 0.");
            0
        }
        Err(_) => {
            errors.add(field, "Enter a whole number.");
            0
        }
    }
}
// endregion: --- Field Helpers

// region:    --- Auction Form
/// 경매 등록 폼
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuctionForm {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price: String,
    pub end_date: String,
}

impl AuctionForm {
    pub const FIELDS: &'static [&'static str] =
        &["title", "description", "image_url", "price", "end_date"];

    /// 종료일이 오늘 이전이면 거부
    pub fn validate(&self, today: NaiveDate) -> Result<NewAuction, FormErrors> {
        let mut errors = FormErrors::default();

        let title = required(&mut errors, "title", &self.title);
        max_len(&mut errors, "title", title, TITLE_MAX_LEN);
        let description = required(&mut errors, "description", &self.description);
        max_len(&mut errors, "description", description, DESCRIPTION_MAX_LEN);
        let image_url = required(&mut errors, "image_url", &self.image_url);
        max_len(&mut errors, "image_url", image_url, IMAGE_URL_MAX_LEN);
        if !image_url.is_empty() && !looks_like_url(image_url) {
            errors.add("image_url", "Enter a valid URL.");
        }
        let price = amount(&mut errors, "price", &self.price);

        let raw_end = required(&mut errors, "end_date", &self.end_date);
        let end_date = if raw_end.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(raw_end, "%Y-%m-%d") {
                Ok(date) if date < today => {
                    errors.add("end_date", "The date you entered has passed");
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("end_date", "Enter a valid date.");
                    None
                }
            }
        };

        match end_date {
            Some(end_date) => errors.finish(|| NewAuction {
                title: title.to_string(),
                description: description.to_string(),
                image_url: image_url.to_string(),
                price,
                end_date,
            }),
            None => Err(errors),
        }
    }
}

fn looks_like_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.contains(char::is_whitespace))
}
// endregion: --- Auction Form

// region:    --- Listing Post
/// `/listing/:id` POST 본문 (입찰 또는 댓글)
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingPost {
    pub price: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    Bid(i64),
    Comment(String),
}

impl ListingPost {
    /// 유효한 price 가 있으면 입찰, 아니면 댓글로 본다.
    /// 둘 다 유효하지 않으면 입력된 쪽의 오류를 돌려준다.
    pub fn validate(&self) -> Result<ListingAction, FormErrors> {
        let bid = self.price.as_ref().map(|price| {
            BidForm {
                price: price.clone(),
            }
            .validate()
        });
        if let Some(Ok(amount)) = bid {
            return Ok(ListingAction::Bid(amount));
        }

        let comment = self
            .body
            .as_ref()
            .map(|body| CommentForm { body: body.clone() }.validate());
        if let Some(Ok(body)) = comment {
            return Ok(ListingAction::Comment(body));
        }

        let price_given = self.price.as_deref().is_some_and(|p| !p.trim().is_empty());
        match (bid, comment) {
            (Some(Err(errors)), _) if price_given => Err(errors),
            (_, Some(Err(errors))) => Err(errors),
            (Some(Err(errors)), None) => Err(errors),
            _ => {
                let mut errors = FormErrors::default();
                errors.add("price", REQUIRED);
                errors.add("body", REQUIRED);
                Err(errors)
            }
        }
    }
}

/// 입찰 폼 (금액만 받고 사용자/경매는 커맨드에서 붙인다)
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BidForm {
    pub price: String,
}

impl BidForm {
    pub fn validate(&self) -> Result<i64, FormErrors> {
        let mut errors = FormErrors::default();
        let price = amount(&mut errors, "price", &self.price);
        errors.finish(|| price)
    }
}

/// 댓글 폼
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub body: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::default();
        let body = required(&mut errors, "body", &self.body);
        errors.finish(|| body.to_string())
    }
}
// endregion: --- Listing Post

// region:    --- Account Forms
/// 회원가입 폼
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

/// 검증된 회원가입 입력. 확인 비밀번호 일치 여부는 호출 측에서 따로 본다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub passwords_match: bool,
}

impl RegisterForm {
    pub const FIELDS: &'static [&'static str] = &["username", "email", "password", "confirmation"];

    pub fn validate(&self) -> Result<Registration, FormErrors> {
        let mut errors = FormErrors::default();
        let username = required(&mut errors, "username", &self.username);
        max_len(&mut errors, "username", username, 150);
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }
        errors.finish(|| Registration {
            username: username.to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            passwords_match: self.password == self.confirmation,
        })
    }
}

/// 로그인 폼
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub const FIELDS: &'static [&'static str] = &["username", "password"];

    pub fn validate(&self) -> Result<(String, String), FormErrors> {
        let mut errors = FormErrors::default();
        let username = required(&mut errors, "username", &self.username);
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }
        errors.finish(|| (username.to_string(), self.password.clone()))
    }
}
// endregion: --- Account Forms

// region:    --- Watchlist Form
/// 관심 목록 동작 구분자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchAction {
    AddToWatchlist,
    RemoveFromWatchlist,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistForm {
    pub listing_id: i64,
    pub to_watchlist: WatchAction,
}

/// 경매 종료 폼
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseListingForm {
    pub listing_id: i64,
}
// endregion: --- Watchlist Form
