use std::collections::BTreeMap;

use getset::Getters;
use strum::Display;
use strum::EnumString;
use strum::IntoStaticStr;
use typed_builder::TypedBuilder;

/// One station listing on the stream data page.
#[derive(Clone, PartialEq, Eq, Debug, Default, Getters, TypedBuilder)]
#[getset(get = "pub")]
pub struct Stream {
    #[builder(default)]
    title: String,
    /// Remaining lines of the title block (frequency, phone number, ...), blanks dropped.
    #[builder(default)]
    info: Vec<String>,
    #[builder(default)]
    listeners: String,
    #[builder(default)]
    location: String,
    /// File extension of the stream file -> absolute URL.
    #[builder(default)]
    urls: BTreeMap<String, String>,
}

impl Stream {
    pub fn url(&self, format: FileFormat) -> Option<&str> {
        self.urls.get(format.key()).map(String::as_str)
    }
}

/// Stream file formats offered by the site, keyed by their file extension.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    Default,
    Display,
    EnumString,
    IntoStaticStr,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase")]
pub enum FileFormat {
    /// Shoutcast/Winamp playlist
    #[default]
    Pls,
    /// RealAudio metafile
    Ram,
    /// Windows Media redirector
    Asx,
    /// QuickTime link
    Qtl,
}

impl FileFormat {
    pub fn key(self) -> &'static str {
        self.into()
    }
}
