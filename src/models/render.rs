use serde::{Deserialize, Serialize};

/// Page regions the port details view writes into. Each target goes on
/// the wire as the selector of the element it addresses; breadcrumb
/// selectors name the anchor element and content goes to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomTarget {
    #[serde(rename = "#topologyId")]
    TopologyBreadcrumb,
    #[serde(rename = "#kilda-switch-name")]
    SwitchNameBreadcrumb,
    #[serde(rename = "#kilda-port-name")]
    PortNameBreadcrumb,
    #[serde(rename = ".graph_div")]
    Graph,
    #[serde(rename = ".port_details_div_status")]
    PortStatus,
    #[serde(rename = "#edit_port_status")]
    PortStatusEdit,
    #[serde(rename = ".switchdetails_div_number")]
    PortNumber,
    #[serde(rename = ".switchdetails_div_interface")]
    InterfaceType,
    #[serde(rename = ".switchportdetails_div_switch_id")]
    SwitchId,
}

/// RenderCommand is one DOM mutation for the page to apply, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderCommand {
    AppendLink {
        target: DomTarget,
        href: String,
        text: String,
    },
    AppendText {
        target: DomTarget,
        text: String,
    },
    Show {
        target: DomTarget,
    },
    SetText {
        target: DomTarget,
        text: String,
    },
    SetValue {
        target: DomTarget,
        value: String,
    },
    /// Lift the loading-time pointer-events block on the page body
    EnableInteraction,
    /// Kick off the metrics chart fetch; the page does not wait on it
    LoadPortMetrics,
}

#[cfg(test)]
impl RenderCommand {
    pub fn target(&self) -> Option<DomTarget> {
        match self {
            RenderCommand::AppendLink { target, .. }
            | RenderCommand::AppendText { target, .. }
            | RenderCommand::Show { target }
            | RenderCommand::SetText { target, .. }
            | RenderCommand::SetValue { target, .. } => Some(*target),
            RenderCommand::EnableInteraction | RenderCommand::LoadPortMetrics => None,
        }
    }
}

/// HydrationOutcome is the terminal result of one page load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HydrationOutcome {
    /// Cache hit: every command, breadcrumbs first
    Rendered { commands: Vec<RenderCommand> },
    /// No valid state: navigate away after applying the breadcrumb commands
    Redirect {
        location: String,
        commands: Vec<RenderCommand>,
    },
}

#[cfg(test)]
impl HydrationOutcome {
    pub fn commands(&self) -> &[RenderCommand] {
        match self {
            HydrationOutcome::Rendered { commands } => commands,
            HydrationOutcome::Redirect { commands, .. } => commands,
        }
    }

    pub fn redirect_location(&self) -> Option<&str> {
        match self {
            HydrationOutcome::Redirect { location, .. } => Some(location),
            HydrationOutcome::Rendered { .. } => None,
        }
    }
}
