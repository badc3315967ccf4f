//! HTTP Basic authentication in front of the hosting environment
//!
//! Nothing in the inspection model depends on this module. It decides,
//! per inbound request, whether to forward it unchanged or answer with a
//! 401 challenge.
//!
//! The decoded `user:password` pair is split at the first colon only, so a
//! password may itself contain colons. Trailing `:...` segments are part of
//! the password and never ignored. Padding on the base64 payload is optional.
use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use http::{HeaderValue, Request, Response, StatusCode};

pub const CHALLENGE: &str = "Basic realm=\"Secure Area\"";
pub const CHALLENGE_BODY: &str = "Authentication Required";

// clients are not consistent about padding
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuthCredentials {
    username: String,
    password: String,
}

impl BasicAuthCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    /// Value for an `Authorization` header carrying these credentials
    pub fn to_header_value(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {encoded}")
    }
    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

// keep the password out of logs
impl std::fmt::Debug for BasicAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct BasicAuthGate {
    credentials: Option<BasicAuthCredentials>,
}

impl BasicAuthGate {
    /// A gate without credentials forwards everything.
    pub fn new(credentials: Option<BasicAuthCredentials>) -> Self {
        if credentials.is_none() {
            tracing::warn!("basic auth credentials are not configured, requests pass unchecked");
        }
        Self { credentials }
    }

    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    /// Forward `request` untouched, or answer it with a 401 challenge.
    pub fn admit<B>(&self, request: Request<B>) -> Result<Request<B>, Response<String>> {
        let Some(credentials) = &self.credentials else {
            return Ok(request);
        };

        let header = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        match header.and_then(decode_basic) {
            Some((username, password)) if credentials.matches(&username, &password) => {
                Ok(request)
            }
            Some((username, _)) => {
                tracing::info!(%username, "basic auth rejected");
                Err(challenge())
            }
            None => Err(challenge()),
        }
    }
}

// "Basic <base64(user:pass)>" -> (user, pass), split at the first colon
fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = LENIENT.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

pub fn challenge() -> Response<String> {
    let mut response = Response::new(CHALLENGE_BODY.to_string());
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD_NO_PAD;

    fn request(authorization: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap()
    }

    fn gate() -> BasicAuthGate {
        BasicAuthGate::new(Some(BasicAuthCredentials::new("inspector", "s3cret")))
    }

    fn assert_challenged(result: Result<Request<()>, Response<String>>) {
        let response = result.expect_err("request should be challenged");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], CHALLENGE);
        assert_eq!(response.body(), CHALLENGE_BODY);
    }

    #[test]
    fn unconfigured_gate_forwards() {
        let gate = BasicAuthGate::new(None);
        assert!(!gate.is_enabled());
        assert!(gate.admit(request(None)).is_ok());
    }

    #[test]
    fn matching_credentials_forward_the_request() {
        let header = BasicAuthCredentials::new("inspector", "s3cret").to_header_value();
        let admitted = gate().admit(request(Some(&header))).unwrap();
        assert_eq!(admitted.uri(), "/");
    }

    #[test]
    fn missing_or_foreign_scheme_is_challenged() {
        assert_challenged(gate().admit(request(None)));
        assert_challenged(gate().admit(request(Some("Bearer abc"))));
    }

    #[test]
    fn wrong_password_is_challenged() {
        let header = BasicAuthCredentials::new("inspector", "guess").to_header_value();
        assert_challenged(gate().admit(request(Some(&header))));
    }

    #[test]
    fn garbage_payload_is_challenged() {
        assert_challenged(gate().admit(request(Some("Basic !!!not-base64"))));
        // decodes, but carries no colon
        let header = format!("Basic {}", STANDARD.encode("inspector"));
        assert_challenged(gate().admit(request(Some(&header))));
    }

    #[test]
    fn password_may_contain_colons() {
        let gate = BasicAuthGate::new(Some(BasicAuthCredentials::new("inspector", "a:b")));
        let header = BasicAuthCredentials::new("inspector", "a:b").to_header_value();
        assert!(gate.admit(request(Some(&header))).is_ok());
    }

    #[test]
    fn extra_colon_segments_belong_to_the_password() {
        let gate = BasicAuthGate::new(Some(BasicAuthCredentials::new("inspector", "a")));
        let header = format!("Basic {}", STANDARD.encode("inspector:a:b"));
        assert_challenged(gate.admit(request(Some(&header))));
    }

    #[test]
    fn unpadded_payload_is_accepted() {
        let header = format!("Basic {}", STANDARD_NO_PAD.encode("inspector:s3cret"));
        assert!(!header.ends_with('='));
        assert!(gate().admit(request(Some(&header))).is_ok());

        let padded = BasicAuthCredentials::new("inspector", "s3cret").to_header_value();
        assert!(padded.ends_with('='));
        assert!(gate().admit(request(Some(&padded))).is_ok());
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", BasicAuthCredentials::new("inspector", "s3cret"));
        assert!(!rendered.contains("s3cret"));
    }
}
