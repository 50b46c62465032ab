use clap::ValueEnum;
use errview_engine::GroupKey;
use errview_types::Dimension;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DimensionArg {
    #[value(alias = "code")]
    Errorcode,
    #[value(alias = "sitename")]
    Site,
    #[value(alias = "stepname")]
    Step,
}

impl From<DimensionArg> for Dimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::Errorcode => Dimension::ErrorCode,
            DimensionArg::Site => Dimension::Site,
            DimensionArg::Step => Dimension::Step,
        }
    }
}

impl fmt::Display for DimensionArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionArg::Errorcode => write!(f, "errorcode"),
            DimensionArg::Site => write!(f, "site"),
            DimensionArg::Step => write!(f, "step"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum GroupKeyArg {
    Value,
    Workflow,
    Tier,
}

impl From<GroupKeyArg> for GroupKey {
    fn from(arg: GroupKeyArg) -> Self {
        match arg {
            GroupKeyArg::Value => GroupKey::Value,
            GroupKeyArg::Workflow => GroupKey::Workflow,
            GroupKeyArg::Tier => GroupKey::Tier,
        }
    }
}

impl fmt::Display for GroupKeyArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKeyArg::Value => write!(f, "value"),
            GroupKeyArg::Workflow => write!(f, "workflow"),
            GroupKeyArg::Tier => write!(f, "tier"),
        }
    }
}
