use tracing::debug;
use url::{Host, Url};

use crate::model::{DomainGroups, IconIndex, Tab};

pub const UNKNOWN_DOMAIN: &str = "unknown";

/// The network location of a URL exactly as written (`user@Host:443`), or an
/// empty string when there is no `//` authority. Nothing is normalized: case,
/// default ports and IDN labels are kept.
pub fn network_location(url: &str) -> &str {
    let rest = match url.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => url,
    };
    let Some(authority) = rest.strip_prefix("//") else {
        return "";
    };
    let end = authority
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(authority.len());
    &authority[..end]
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Extract the registrable domain (`domain.suffix`) of a URL.
///
/// Only ICANN suffixes from the public suffix list count. Private-section
/// entries such as `github.io` are registrable domains themselves, so every
/// `*.github.io` page lands under `github.io`. Hosts without a listed suffix,
/// such as `localhost` or IP addresses, fall back to the network location and
/// then to [`UNKNOWN_DOMAIN`].
///
/// Examples:
/// - https://news.bbc.co.uk/article → bbc.co.uk
/// - https://alice.github.io/blog → github.io
/// - mailto:someone@example.com → example.com
/// - http://localhost:3000/ → localhost:3000
/// - not a url → unknown
pub fn registrable_domain(url: &str) -> String {
    if let Some(domain) = host_of(url).as_deref().and_then(icann_domain) {
        return domain.to_string();
    }

    let netloc = network_location(url);
    if netloc.is_empty() {
        debug!(component = "domain_grouper", url = url, "No domain or host, using fallback");
        UNKNOWN_DOMAIN.to_string()
    } else {
        netloc.to_string()
    }
}

fn host_of(url: &str) -> Option<String> {
    match Url::parse(url).as_ref().map(Url::host) {
        Ok(Some(Host::Domain(host))) => Some(host.trim_end_matches('.').to_string()),
        Ok(Some(Host::Ipv4(_) | Host::Ipv6(_))) => None,
        // No parseable host: "example.com/page", "mailto:user@example.com"
        Ok(None) | Err(_) => lenient_host(url),
    }
}

/// Host guessed from free-form text: drop a `scheme://` prefix, the path,
/// userinfo and port.
fn lenient_host(url: &str) -> Option<String> {
    let rest = match url.find("//") {
        Some(0) => &url[2..],
        Some(i) if i >= 2 && url[..i].ends_with(':') && is_scheme(&url[..i - 1]) => &url[i + 2..],
        _ => url,
    };
    let authority = rest
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();

    (!host.is_empty()).then_some(host)
}

/// The ICANN registrable domain of `host`. A private-section match such as
/// `github.io` is retried on its parent suffix (`io`).
fn icann_domain(host: &str) -> Option<&str> {
    let mut tail = host;
    let suffix_len = loop {
        let suffix = psl::suffix(tail.as_bytes())?;
        let len = suffix.as_bytes().len();
        match suffix.typ() {
            Some(psl::Type::Icann) => break len,
            Some(psl::Type::Private) => tail = tail[tail.len() - len..].split_once('.')?.1,
            None => return None,
        }
    };

    let suffix_start = host.len().checked_sub(suffix_len)?;
    let prefix = host.get(..suffix_start.checked_sub(1)?)?;
    let label_start = prefix.rfind('.').map_or(0, |dot| dot + 1);
    if label_start == prefix.len() {
        return None;
    }
    host.get(label_start..)
}

/// Tabs bucketed by registrable domain plus one representative icon per domain.
#[derive(Debug, Default)]
pub struct Grouping {
    pub groups: DomainGroups,
    pub icons: IconIndex,
}

impl Grouping {
    /// Domains in lexicographic order.
    pub fn sorted_domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        domains.sort_unstable();
        domains
    }
}

/// Group tabs by registrable domain. A domain's icon is the first non-empty
/// icon among its tabs and is never replaced afterwards.
pub fn group_by_domain(tabs: Vec<Tab>) -> Grouping {
    let mut grouping = Grouping::default();

    for tab in tabs {
        let domain = registrable_domain(&tab.url);
        if !tab.icon.is_empty() {
            grouping
                .icons
                .entry(domain.clone())
                .or_insert_with(|| tab.icon.clone());
        }
        grouping.groups.entry(domain).or_default().push(tab);
    }

    debug!(
        action = "complete",
        component = "domain_grouper",
        domain_count = grouping.groups.len(),
        icon_count = grouping.icons.len(),
        "Domain grouping completed"
    );
    grouping
}
