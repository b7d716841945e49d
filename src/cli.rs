use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{App, AppSettings, Arg, ArgGroup, ArgMatches};

use cloud_gallery::config::DEFAULT_CONFIG_PATH;

static VERSION: &str = env!("CARGO_PKG_VERSION");
static AUTHOR: &str = "apmaros";
static DESCRIPTION: &str = "Browse and grow a tagged photo gallery hosted in the cloud";
const LIST: &str = "list";
const SHOW: &str = "show";
const BROWSE: &str = "browse";
const UPLOAD: &str = "upload";
pub(crate) const CONFIG: &str = "config";
const CONFIG_SHORT: &str = "c";
pub(crate) const TAG: &str = "tag";
const TAG_SHORT: &str = "t";
pub(crate) const FOLDER: &str = "folder";
const FOLDER_SHORT: &str = "d";
pub(crate) const FILE: &str = "file";
const FILE_SHORT: &str = "f";
const SOURCE: &str = "source";

fn tag_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(TAG)
        .short(TAG_SHORT)
        .long(TAG)
        .takes_value(true)
        .help("Gallery tag, one of the tags in the config file")
        .required(true)
}

pub(crate) fn build_cli<'a>() -> ArgMatches<'a> {
    App::new("cloud-gallery")
        .version(VERSION)
        .author(AUTHOR)
        .about(DESCRIPTION)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(Arg::with_name(CONFIG)
            .short(CONFIG_SHORT)
            .long(CONFIG)
            .takes_value(true)
            .global(true)
            .default_value(DEFAULT_CONFIG_PATH)
            .help("Gallery config file (JSON)"))
        .subcommand(App::new(LIST)
            .about("Loads every gallery and prints how many images each holds"))
        .subcommand(App::new(SHOW)
            .about("Prints the thumbnail grid of one gallery")
            .arg(tag_arg()))
        .subcommand(App::new(BROWSE)
            .about("Opens one gallery in the lightbox, arrows navigate and Esc closes")
            .arg(tag_arg()))
        .subcommand(App::new(UPLOAD)
            .about("Uploads images into a gallery, then refreshes all galleries")
            .arg(Arg::with_name(FOLDER)
                .short(FOLDER_SHORT)
                .long(FOLDER)
                .takes_value(true)
                .help("Folder containing images to be uploaded"))
            .arg(Arg::with_name(FILE)
                .short(FILE_SHORT)
                .long(FILE)
                .takes_value(true)
                .multiple(true)
                .help("Image file to be uploaded, may be repeated"))
            .group(ArgGroup::with_name(SOURCE)
                .args(&[FOLDER, FILE])
                .required(true))
            .arg(tag_arg()))
        .get_matches()
}

pub(crate) enum CliCommand {
    List,
    Show,
    Browse,
    Upload,
}

impl FromStr for CliCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            LIST => Ok(Self::List),
            SHOW => Ok(Self::Show),
            BROWSE => Ok(Self::Browse),
            UPLOAD => Ok(Self::Upload),
            _ => Err(format!("Command {} was not recognised", s)),
        }
    }
}

impl fmt::Display for CliCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CliCommand::List => LIST,
            CliCommand::Show => SHOW,
            CliCommand::Browse => BROWSE,
            CliCommand::Upload => UPLOAD,
        };
        write!(f, "{}", name)
    }
}

pub(crate) fn config_path(matches: &ArgMatches) -> PathBuf {
    let from_sub = matches.subcommand().1.and_then(|m| m.value_of(CONFIG));
    PathBuf::from(from_sub.or_else(|| matches.value_of(CONFIG)).unwrap_or(DEFAULT_CONFIG_PATH))
}

pub(crate) struct TagCmd {
    pub(crate) tag: String,
}

impl TagCmd {
    pub(crate) fn build(matches: &ArgMatches) -> Self {
        // safe to unwrap, tag is required
        let tag = matches.value_of(TAG).unwrap().to_owned();
        TagCmd { tag }
    }
}

pub(crate) enum UploadSource {
    Folder(PathBuf),
    Files(Vec<PathBuf>),
}

pub(crate) struct UploadCmd {
    pub(crate) source: UploadSource,
    pub(crate) tag: String,
}

impl UploadCmd {
    pub(crate) fn build(matches: &ArgMatches) -> Self {
        // safe to unwrap, tag is required and the source group needs one of its args
        let tag = matches.value_of(TAG).unwrap().to_owned();
        let source = match matches.value_of(FOLDER) {
            Some(folder) => UploadSource::Folder(PathBuf::from(folder)),
            None => UploadSource::Files(
                matches.values_of(FILE).unwrap().map(PathBuf::from).collect()
            ),
        };

        UploadCmd { source, tag }
    }
}
