//! services/web/src/adapters/soap.rs
//!
//! The transport seam to the remote SOAP game-voting service. The service
//! speaks SOAP 1.1 RPC over HTTP POST: one method element per call, flat
//! named parameters, and a `<return>` payload that is either a boolean
//! literal or a list of `<item>` game records. Faults come back as standard
//! `<faultcode>`/`<faultstring>` pairs.
//!
//! The envelope codec here is deliberately minimal: it only understands the
//! shapes this one service produces.

use async_trait::async_trait;

//=========================================================================================
// Transport Contract
//=========================================================================================

/// A transport-level failure: network error, bad HTTP status, SOAP fault,
/// or a response body the codec cannot make sense of.
#[derive(Debug, Clone)]
pub struct SoapFault {
    pub code: String,
    pub message: String,
}

impl SoapFault {
    fn malformed(detail: impl Into<String>) -> Self {
        Self {
            code: "Client".to_string(),
            message: detail.into(),
        }
    }

    fn http(detail: impl Into<String>) -> Self {
        Self {
            code: "HTTP".to_string(),
            message: detail.into(),
        }
    }
}

/// A game as it appears on the wire. The title is still carrying the remote
/// storage layer's escaping; the adapter reverses it during domain
/// conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: i64,
    pub title: String,
    pub votes: i64,
    pub status: String,
    pub ip: String,
    pub votetime: String,
}

/// The decoded `<return>` payload of a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoapReturn {
    /// `true` acknowledgements and the `false` failure sentinel.
    Boolean(bool),
    /// The game list returned by `getGames`.
    Records(Vec<GameRecord>),
}

/// One remote procedure call. Implemented by the HTTP client below and by
/// stubs in tests.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<SoapReturn, SoapFault>;
}

//=========================================================================================
// HTTP Client
//=========================================================================================

/// `SoapTransport` over a reqwest HTTP client.
#[derive(Clone)]
pub struct HttpSoapClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSoapClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SoapTransport for HttpSoapClient {
    async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<SoapReturn, SoapFault> {
        let request_body = envelope(method, params);

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", method)
            .body(request_body)
            .send()
            .await
            .map_err(|e| SoapFault::http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SoapFault::http(e.to_string()))?;

        // Faults ride on 500 responses, so read the body before judging
        // the status code.
        if let Some(fault) = parse_fault(&body) {
            return Err(fault);
        }
        if !status.is_success() {
            return Err(SoapFault::http(format!("request failed with status {status}")));
        }

        parse_return(&body)
    }
}

//=========================================================================================
// Envelope Codec
//=========================================================================================

fn envelope(method: &str, params: &[(&str, String)]) -> String {
    let mut args = String::new();
    for (name, value) in params {
        args.push_str(&format!("<{name}>{}</{name}>", xml_escape(value)));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <SOAP-ENV:Envelope xmlns:SOAP-ENV=\"http://schemas.xmlsoap.org/soap/envelope/\">\
         <SOAP-ENV:Body><{method}>{args}</{method}></SOAP-ENV:Body>\
         </SOAP-ENV:Envelope>"
    )
}

fn parse_fault(body: &str) -> Option<SoapFault> {
    let message = tag_content(body, "faultstring")?;
    let code = tag_content(body, "faultcode").unwrap_or("Unknown");
    Some(SoapFault {
        code: xml_unescape(code.trim()),
        message: xml_unescape(message.trim()),
    })
}

fn parse_return(body: &str) -> Result<SoapReturn, SoapFault> {
    let payload = tag_content(body, "return")
        .ok_or_else(|| SoapFault::malformed("response has no return element"))?;

    if payload.contains("<item") {
        let records = item_blocks(payload)
            .into_iter()
            .map(parse_record)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(SoapReturn::Records(records));
    }

    match payload.trim() {
        // An empty return is an empty game list, not the failure sentinel.
        "" => Ok(SoapReturn::Records(Vec::new())),
        "true" | "1" => Ok(SoapReturn::Boolean(true)),
        "false" | "0" => Ok(SoapReturn::Boolean(false)),
        other => Err(SoapFault::malformed(format!(
            "unrecognized return payload: {other}"
        ))),
    }
}

fn parse_record(item: &str) -> Result<GameRecord, SoapFault> {
    let field = |tag: &str| {
        tag_content(item, tag)
            .map(|s| xml_unescape(s.trim()))
            .ok_or_else(|| SoapFault::malformed(format!("game record missing {tag}")))
    };
    let numeric = |tag: &str| {
        field(tag)?
            .parse::<i64>()
            .map_err(|_| SoapFault::malformed(format!("game record has non-numeric {tag}")))
    };

    Ok(GameRecord {
        id: numeric("id")?,
        title: field("title")?,
        votes: numeric("votes")?,
        status: field("status")?,
        ip: field("ip").unwrap_or_default(),
        votetime: field("votetime").unwrap_or_default(),
    })
}

/// Content of the first `<tag ...>...</tag>` element, or `""` for a
/// self-closing one. Attribute-bearing open tags are handled; a tag whose
/// name merely starts with `tag` is not a match.
fn tag_content<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open_pat = format!("<{tag}");
    let close_pat = format!("</{tag}>");
    let mut search = 0usize;

    loop {
        let start = xml[search..].find(&open_pat)? + search;
        let rest = &xml[start + open_pat.len()..];
        let next = rest.chars().next()?;

        if next == '>' {
            let content_start = start + open_pat.len() + 1;
            let end = xml[content_start..].find(&close_pat)? + content_start;
            return Some(&xml[content_start..end]);
        }
        if next.is_whitespace() || next == '/' {
            let gt = rest.find('>')?;
            if rest[..gt].trim_end().ends_with('/') {
                return Some("");
            }
            let content_start = start + open_pat.len() + gt + 1;
            let end = xml[content_start..].find(&close_pat)? + content_start;
            return Some(&xml[content_start..end]);
        }

        // Prefix of a longer tag name; keep looking.
        search = start + open_pat.len();
    }
}

fn item_blocks(payload: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = payload;
    while let Some(start) = rest.find("<item") {
        let slice = &rest[start..];
        let Some(inner) = tag_content(slice, "item") else {
            break;
        };
        blocks.push(inner);
        let advance = slice
            .find("</item>")
            .map(|i| i + "</item>".len())
            .unwrap_or(slice.len());
        rest = &slice[advance..];
    }
    blocks
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn xml_unescape(s: &str) -> String {
    // &amp; must go last so freshly produced ampersands are not re-expanded.
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
