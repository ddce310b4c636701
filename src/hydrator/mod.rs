use anyhow::Result;

use crate::cache::{build_cache_key, PortCache};
use crate::models::*;
use crate::navigation::{parse_navigation_context, split_fragment, NavigationContext};

/// Typed error for a cache entry that exists but does not decode into a
/// PortDetailRecord. Kept distinct from a miss so the API layer can
/// surface it instead of redirecting.
#[derive(Debug)]
pub struct MalformedCacheEntryError {
    pub key: String,
    pub reason: String,
}

impl std::fmt::Display for MalformedCacheEntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed cache entry {}: {}", self.key, self.reason)
    }
}

impl std::error::Error for MalformedCacheEntryError {}

/// Terminal state a page load ends in; one outcome per load, no way back
/// to loading. Used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Redirecting,
    Rendered,
}

impl PageState {
    pub fn of(outcome: &HydrationOutcome) -> Self {
        match outcome {
            HydrationOutcome::Rendered { .. } => PageState::Rendered,
            HydrationOutcome::Redirect { .. } => PageState::Redirecting,
        }
    }
}

impl std::fmt::Display for PageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PageState::Redirecting => "redirecting",
            PageState::Rendered => "rendered",
        };
        f.write_str(s)
    }
}

/// Route the page falls back to when it has no valid state
pub fn switch_listing_path(app_base_path: &str) -> String {
    format!("{}/switch", app_base_path)
}

/// Breadcrumb links added on every load, before the cache is consulted.
/// Built from the raw address segments whether or not they are valid;
/// only absent segments are left out.
pub fn breadcrumb_commands(
    switch_name: Option<&str>,
    port_number: Option<&str>,
    app_base_path: &str,
) -> Vec<RenderCommand> {
    let mut commands = vec![RenderCommand::AppendLink {
        target: DomTarget::TopologyBreadcrumb,
        href: switch_listing_path(app_base_path),
        text: "Switch".to_string(),
    }];

    if let Some(switch_name) = switch_name {
        commands.push(RenderCommand::AppendLink {
            target: DomTarget::SwitchNameBreadcrumb,
            href: format!("details#{}", switch_name),
            text: switch_name.to_string(),
        });
    }
    if let Some(port_number) = port_number {
        commands.push(RenderCommand::AppendText {
            target: DomTarget::PortNameBreadcrumb,
            text: port_number.to_string(),
        });
    }

    commands
}

/// Field bindings for a cached record, followed by the interaction unlock
/// and the metrics trigger. `switch_name` is shown raw, not normalized.
pub fn hydrate_record(record: &PortDetailRecord, switch_name: &str) -> Vec<RenderCommand> {
    vec![
        RenderCommand::AppendText {
            target: DomTarget::PortNameBreadcrumb,
            text: record.port_name.clone(),
        },
        RenderCommand::Show {
            target: DomTarget::Graph,
        },
        RenderCommand::SetText {
            target: DomTarget::PortStatus,
            text: record.status.clone(),
        },
        RenderCommand::SetValue {
            target: DomTarget::PortStatusEdit,
            value: record.status.clone(),
        },
        RenderCommand::SetText {
            target: DomTarget::PortNumber,
            text: record.port_number.to_string(),
        },
        RenderCommand::SetText {
            target: DomTarget::InterfaceType,
            text: record.interfacetype.clone(),
        },
        RenderCommand::SetText {
            target: DomTarget::SwitchId,
            text: switch_name.to_string(),
        },
        RenderCommand::EnableInteraction,
        RenderCommand::LoadPortMetrics,
    ]
}

/// Decode a stored blob, tagging failures with the key they came from
pub fn decode_record(key: &str, raw: &str) -> Result<PortDetailRecord> {
    serde_json::from_str(raw).map_err(|e| {
        MalformedCacheEntryError {
            key: key.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// PortDetailHydrator turns a page address into the commands that
/// populate the port details view, reading state from the port cache.
/// It never writes to the cache.
pub struct PortDetailHydrator<'a> {
    cache: &'a dyn PortCache,
    app_base_path: &'a str,
}

impl<'a> PortDetailHydrator<'a> {
    pub fn new(cache: &'a dyn PortCache, app_base_path: &'a str) -> Self {
        Self {
            cache,
            app_base_path,
        }
    }

    /// Hydrate from the full page address
    pub async fn hydrate_url(&self, url: &str) -> Result<HydrationOutcome> {
        let segments = split_fragment(url);
        let breadcrumbs =
            breadcrumb_commands(segments.switch_name, segments.port_number, self.app_base_path);
        let ctx = parse_navigation_context(url);
        if ctx.is_none() {
            tracing::debug!("No navigation context in {:?}", url);
        }
        self.resolve(breadcrumbs, ctx.as_ref()).await
    }

    async fn resolve(
        &self,
        mut commands: Vec<RenderCommand>,
        ctx: Option<&NavigationContext>,
    ) -> Result<HydrationOutcome> {
        let outcome = match ctx {
            None => self.redirect(commands),
            Some(ctx) => {
                let key = build_cache_key(ctx);
                match self.cache.get(&key).await? {
                    None => {
                        tracing::debug!("Port cache miss for {}", key);
                        self.redirect(commands)
                    }
                    Some(raw) => {
                        let record = decode_record(&key, &raw).map_err(|e| {
                            tracing::warn!("{}", e);
                            e
                        })?;
                        commands.extend(hydrate_record(&record, &ctx.switch_name));
                        HydrationOutcome::Rendered { commands }
                    }
                }
            }
        };

        tracing::debug!("Port details page {}", PageState::of(&outcome));
        Ok(outcome)
    }

    fn redirect(&self, commands: Vec<RenderCommand>) -> HydrationOutcome {
        HydrationOutcome::Redirect {
            location: switch_listing_path(self.app_base_path),
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryPortCache;

    const BASE: &str = "/openkilda";
    const RECORD_A: &str =
        r#"{"status":"up","port_number":3,"port_name":"eth0","interfacetype":"copper"}"#;

    async fn cache_with(entries: &[(&str, &str)]) -> MemoryPortCache {
        let cache = MemoryPortCache::new();
        for (k, v) in entries {
            cache.insert(*k, *v).await;
        }
        cache
    }

    fn text_for(commands: &[RenderCommand], target: DomTarget) -> Vec<String> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::SetText { target: t, text } if *t == target => Some(text.clone()),
                RenderCommand::AppendText { target: t, text } if *t == target => Some(text.clone()),
                RenderCommand::SetValue { target: t, value } if *t == target => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    fn is_field_binding(cmd: &RenderCommand) -> bool {
        !matches!(
            cmd.target(),
            Some(DomTarget::TopologyBreadcrumb)
                | Some(DomTarget::SwitchNameBreadcrumb)
                | Some(DomTarget::PortNameBreadcrumb)
        )
    }

    #[tokio::test]
    async fn test_cache_hit_renders_record_fields() {
        let cache = cache_with(&[("port_AABBCCDDEEFF_3", RECORD_A)]).await;
        let hydrator = PortDetailHydrator::new(&cache, BASE);

        let outcome = hydrator.hydrate_url("/openkilda/switch/portdetails#AA:BB:CC:DD:EE:FF#3").await.unwrap();
        assert_eq!(outcome.redirect_location(), None);

        let commands = outcome.commands();
        assert_eq!(text_for(commands, DomTarget::PortStatus), vec!["up"]);
        assert_eq!(text_for(commands, DomTarget::PortStatusEdit), vec!["up"]);
        assert_eq!(text_for(commands, DomTarget::InterfaceType), vec!["copper"]);
        assert_eq!(text_for(commands, DomTarget::PortNumber), vec!["3"]);
        assert_eq!(text_for(commands, DomTarget::SwitchId), vec!["AA:BB:CC:DD:EE:FF"]);
        // Port number breadcrumb first, then the record's port name
        assert_eq!(text_for(commands, DomTarget::PortNameBreadcrumb), vec!["3", "eth0"]);
        assert!(commands.contains(&RenderCommand::Show { target: DomTarget::Graph }));
    }

    #[tokio::test]
    async fn test_cache_hit_ends_with_unlock_then_metrics() {
        let cache = cache_with(&[("port_AABBCCDDEEFF_3", RECORD_A)]).await;
        let hydrator = PortDetailHydrator::new(&cache, BASE);

        let outcome = hydrator.hydrate_url("#AA:BB:CC:DD:EE:FF#3").await.unwrap();
        let commands = outcome.commands();
        let n = commands.len();
        assert_eq!(commands[n - 2], RenderCommand::EnableInteraction);
        assert_eq!(commands[n - 1], RenderCommand::LoadPortMetrics);
    }

    #[tokio::test]
    async fn test_cache_miss_redirects_without_field_binding() {
        let cache = cache_with(&[("port_AABBCCDDEEFF_3", RECORD_A)]).await;
        let hydrator = PortDetailHydrator::new(&cache, BASE);

        let outcome = hydrator.hydrate_url("#AA:BB:CC:DD:EE:FF#9").await.unwrap();
        assert_eq!(outcome.redirect_location(), Some("/openkilda/switch"));
        assert!(!outcome.commands().iter().any(is_field_binding));
        assert!(!outcome.commands().contains(&RenderCommand::LoadPortMetrics));
    }

    #[tokio::test]
    async fn test_empty_store_redirects() {
        let cache = MemoryPortCache::new();
        let hydrator = PortDetailHydrator::new(&cache, BASE);

        let outcome = hydrator.hydrate_url("#AA:BB:CC:DD:EE:FF#3").await.unwrap();
        assert_eq!(outcome.redirect_location(), Some("/openkilda/switch"));
    }

    #[tokio::test]
    async fn test_breadcrumbs_first_on_hit_and_miss() {
        let cache = cache_with(&[("port_AABBCCDDEEFF_3", RECORD_A)]).await;
        let hydrator = PortDetailHydrator::new(&cache, BASE);
        let expected = breadcrumb_commands(Some("AA:BB:CC:DD:EE:FF"), Some("3"), BASE);

        let hit = hydrator.hydrate_url("#AA:BB:CC:DD:EE:FF#3").await.unwrap();
        assert_eq!(&hit.commands()[..3], expected.as_slice());

        let miss = hydrator.hydrate_url("#AA:BB:CC:DD:EE:FF#9").await.unwrap();
        assert_eq!(
            miss.commands(),
            breadcrumb_commands(Some("AA:BB:CC:DD:EE:FF"), Some("9"), BASE).as_slice()
        );
    }

    #[test]
    fn test_breadcrumb_links() {
        let commands = breadcrumb_commands(Some("AA:BB:CC:DD:EE:FF"), Some("3"), BASE);
        assert_eq!(
            commands[0],
            RenderCommand::AppendLink {
                target: DomTarget::TopologyBreadcrumb,
                href: "/openkilda/switch".into(),
                text: "Switch".into(),
            }
        );
        assert_eq!(
            commands[1],
            RenderCommand::AppendLink {
                target: DomTarget::SwitchNameBreadcrumb,
                href: "details#AA:BB:CC:DD:EE:FF".into(),
                text: "AA:BB:CC:DD:EE:FF".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_equivalent_switch_formats_hit_same_entry() {
        let cache = cache_with(&[("port_AABBCCDDEEFF_3", RECORD_A)]).await;
        let hydrator = PortDetailHydrator::new(&cache, BASE);

        let dashed = hydrator.hydrate_url("#aa-bb-cc-dd-ee-ff#3").await.unwrap();
        assert_eq!(dashed.redirect_location(), None);
        // Display keeps the raw form from the address
        assert_eq!(text_for(dashed.commands(), DomTarget::SwitchId), vec!["aa-bb-cc-dd-ee-ff"]);
    }

    #[tokio::test]
    async fn test_malformed_navigation_redirects() {
        let cache = cache_with(&[("port_AABBCCDDEEFF_3", RECORD_A)]).await;
        let hydrator = PortDetailHydrator::new(&cache, BASE);

        for url in ["/openkilda/switch/portdetails", "#AA:BB:CC:DD:EE:FF", "#AA:BB:CC:DD:EE:FF#x"] {
            let outcome = hydrator.hydrate_url(url).await.unwrap();
            assert_eq!(outcome.redirect_location(), Some("/openkilda/switch"));
            assert!(!outcome.commands().iter().any(is_field_binding));
        }
    }

    #[tokio::test]
    async fn test_invalid_port_still_gets_breadcrumbs() {
        let cache = cache_with(&[("port_AABBCCDDEEFF_3", RECORD_A)]).await;
        let hydrator = PortDetailHydrator::new(&cache, BASE);

        let outcome = hydrator.hydrate_url("#AA:BB:CC:DD:EE:FF#x").await.unwrap();
        assert_eq!(outcome.redirect_location(), Some("/openkilda/switch"));
        assert_eq!(
            outcome.commands(),
            breadcrumb_commands(Some("AA:BB:CC:DD:EE:FF"), Some("x"), BASE).as_slice()
        );
        assert!(outcome.commands().iter().any(|c| c.target() == Some(DomTarget::SwitchNameBreadcrumb)));
        assert_eq!(text_for(outcome.commands(), DomTarget::PortNameBreadcrumb), vec!["x"]);
    }

    #[tokio::test]
    async fn test_absent_segments_dropped_from_breadcrumbs() {
        let cache = MemoryPortCache::new();
        let hydrator = PortDetailHydrator::new(&cache, BASE);

        let no_port = hydrator.hydrate_url("#AA:BB:CC:DD:EE:FF").await.unwrap();
        assert_eq!(
            no_port.commands(),
            breadcrumb_commands(Some("AA:BB:CC:DD:EE:FF"), None, BASE).as_slice()
        );
        assert_eq!(no_port.commands().len(), 2);

        let bare = hydrator.hydrate_url("/openkilda/switch/portdetails").await.unwrap();
        assert_eq!(bare.commands(), breadcrumb_commands(None, None, BASE).as_slice());
        assert_eq!(bare.commands().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_entry_is_fatal() {
        let cache = cache_with(&[("port_AABBCCDDEEFF_3", "{not json")]).await;
        let hydrator = PortDetailHydrator::new(&cache, BASE);

        let err = hydrator.hydrate_url("#AA:BB:CC:DD:EE:FF#3").await.unwrap_err();
        let malformed = err.downcast_ref::<MalformedCacheEntryError>().unwrap();
        assert_eq!(malformed.key, "port_AABBCCDDEEFF_3");
    }

    #[tokio::test]
    async fn test_entry_missing_fields_is_fatal() {
        let cache = cache_with(&[("port_AABBCCDDEEFF_3", r#"{"status":"up"}"#)]).await;
        let hydrator = PortDetailHydrator::new(&cache, BASE);

        let err = hydrator.hydrate_url("#AA:BB:CC:DD:EE:FF#3").await.unwrap_err();
        assert!(err.is::<MalformedCacheEntryError>());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let raw = r#"{"status":"down","port_number":5,"port_name":"p5","interfacetype":"fiber","assignmenttype":"PORT"}"#;
        let record = decode_record("k", raw).unwrap();
        assert_eq!(record.status, "down");
        assert_eq!(record.port_number, 5);
    }

    #[test]
    fn test_page_state_of_outcome() {
        let rendered = HydrationOutcome::Rendered { commands: vec![] };
        assert_eq!(PageState::of(&rendered), PageState::Rendered);

        let redirect = HydrationOutcome::Redirect {
            location: "/switch".into(),
            commands: vec![],
        };
        assert_eq!(PageState::of(&redirect), PageState::Redirecting);
        assert_eq!(PageState::of(&redirect).to_string(), "redirecting");
    }

    #[test]
    fn test_empty_base_path() {
        assert_eq!(switch_listing_path(""), "/switch");
    }
}
