//! Tracker tier reconciliation for `announce-list` ([BEP-12]).
//!
//! Tiers are flattened into one ordered URL list. Entries that do not parse
//! get one repair attempt (a default scheme is prefixed when there is no
//! `://`) and are skipped with a warning if that fails too. After every tier,
//! the primary `announce` URL is appended unless it has been seen in the
//! list so far, so a malformed announce-list can never lose the primary
//! tracker.
//!
//! [BEP-12]: http://bittorrent.org/beps/bep_0012.html

use tracing::{debug, warn};
use url::Url;

use super::import::{ImportOptions, ImportWarning};
use crate::bencode::Value;
use crate::constants::DEFAULT_ANNOUNCE_SCHEME;

/// Removes the spaces some broken encoders leave inside tracker URLs.
pub(crate) fn normalize(url: &str, options: &ImportOptions) -> String {
    if options.strip_whitespace {
        url.chars().filter(|&c| c != ' ').collect()
    } else {
        url.to_string()
    }
}

/// Parses `raw`, retrying once with the default scheme when it has none.
///
/// Returns the text that finally parsed along with the URL.
pub(crate) fn parse_with_repair(raw: &str) -> Result<(String, Url), url::ParseError> {
    let err = match Url::parse(raw) {
        Ok(url) => return Ok((raw.to_string(), url)),
        Err(e) => e,
    };

    if raw.contains("://") {
        return Err(err);
    }

    let sep = if raw.starts_with('/') { "" } else { "/" };
    let repaired = format!("{}:/{}{}", DEFAULT_ANNOUNCE_SCHEME, sep, raw);
    let url = Url::parse(&repaired)?;
    debug!(original = raw, %repaired, "repaired announce url");
    Ok((repaired, url))
}

pub(crate) struct Reconciled {
    pub urls: Vec<Url>,
    pub warnings: Vec<ImportWarning>,
}

/// Flattens `announce-list` tiers, keeping the primary URL reachable.
///
/// `primary` must already be normalized. `tiers` is the raw `announce-list`
/// value, if the key was present.
pub(crate) fn reconcile(
    primary: Option<&str>,
    tiers: Option<&Value>,
    options: &ImportOptions,
) -> Reconciled {
    let mut out = Reconciled {
        urls: Vec::new(),
        warnings: Vec::new(),
    };

    let primary = primary.filter(|p| !p.is_empty());
    let primary_url = primary.and_then(|p| match Url::parse(p) {
        Ok(url) => Some(url),
        Err(reason) => {
            warn!(url = p, %reason, "primary announce url does not parse");
            out.warnings.push(ImportWarning::InvalidPrimaryAnnounce {
                url: p.to_string(),
                reason,
            });
            None
        }
    });
    out.urls.extend(primary_url.clone());

    let tiers: &[Value] = match tiers {
        None => return out,
        Some(Value::List(tiers)) => tiers.as_slice(),
        Some(other) => {
            // Some encoders write an empty string here instead of an empty list.
            warn!(found = other.kind(), "announce-list is not a list, ignoring it");
            out.warnings.push(ImportWarning::MalformedAnnounceList {
                tier: None,
                found: other.kind(),
            });
            return out;
        }
    };

    let mut primary_seen = false;

    for (tier_index, tier) in tiers.iter().enumerate() {
        let entries: &[Value] = match tier {
            Value::List(entries) => entries.as_slice(),
            other => {
                warn!(tier = tier_index, found = other.kind(), "announce tier is not a list");
                out.warnings.push(ImportWarning::MalformedAnnounceList {
                    tier: Some(tier_index),
                    found: other.kind(),
                });
                &[]
            }
        };

        for entry in entries {
            let Some(bytes) = entry.as_bytes() else {
                out.warnings.push(ImportWarning::MalformedAnnounceList {
                    tier: Some(tier_index),
                    found: entry.kind(),
                });
                continue;
            };

            let raw = normalize(&String::from_utf8_lossy(bytes), options);
            match parse_with_repair(&raw) {
                Ok((text, url)) => {
                    if primary.is_some_and(|p| text.eq_ignore_ascii_case(p)) {
                        primary_seen = true;
                    }
                    out.urls.push(url);
                }
                Err(reason) => {
                    warn!(tier = tier_index, url = %raw, %reason, "skipping announce url");
                    out.warnings.push(ImportWarning::SkippedAnnounceUrl {
                        tier: tier_index,
                        url: raw,
                        reason,
                    });
                }
            }
        }

        if primary_seen {
            continue;
        }
        if let Some(url) = &primary_url {
            if options.dedupe_primary && out.urls.contains(url) {
                continue;
            }
            out.urls.push(url.clone());
        }
    }

    out
}
