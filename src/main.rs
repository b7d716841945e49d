mod cli;
mod terminal;
mod utils;

use std::io::stdout;
use std::process::exit;
use std::str::FromStr;

use log::info;

use cloud_gallery::file::{list_files, read_upload_files};
use cloud_gallery::grid::GridView;
use cloud_gallery::upload::UploadOutcome;
use cloud_gallery::{GalleryConfig, GalleryPage, ImageRepository, PageEvent, StoreClient};

use crate::cli::{build_cli, config_path, CliCommand, TagCmd, UploadCmd, UploadSource};
use crate::terminal::{browse, configured_title, render_grid};
use crate::utils::print_progress;

type GenError = Box<dyn std::error::Error>;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = build_cli();
    let path = config_path(&matches);
    let config = GalleryConfig::load(&path).unwrap_or_else(|err| {
        eprintln!("❌  Failed to load {:?}: {}", path, err);
        exit(1);
    });
    info!("loaded config {:?} with {} tags", path, config.tags.len());

    let store = StoreClient::new(config.clone()).unwrap_or_else(|err| {
        eprintln!("Failed to create store client due to error = {}", err);
        exit(1);
    });
    let mut page = GalleryPage::new(config, store);

    let (name, sub_matches) = matches.subcommand();
    let cmd = CliCommand::from_str(name);
    let result = match (cmd, sub_matches) {
        (Ok(CliCommand::List), _) => list_galleries(&page).await,
        (Ok(CliCommand::Show), Some(m)) => show(&mut page, TagCmd::build(m)).await,
        (Ok(CliCommand::Browse), Some(m)) => {
            let c = TagCmd::build(m);
            match configured_title(&page, &c.tag) {
                Ok(_) => {
                    page.initialize().await;
                    browse(&mut page, &c.tag)
                }
                Err(err) => Err(err),
            }
        }
        (Ok(CliCommand::Upload), Some(m)) => upload(&mut page, UploadCmd::build(m)).await,
        (Ok(cmd), None) => Err(GenError::from(format!("Command {} is missing its arguments", cmd))),
        (Err(invalid_cmd), _) => Err(GenError::from(invalid_cmd)),
    };

    println!();
    println!("📋 diagnostics:");
    println!("{}", page.diagnostics().render());

    match result {
        Ok(_) => exit(0),
        Err(err) => {
            eprintln!("❌  Failed due to error='{}'", err);
            exit(1);
        }
    }
}

async fn list_galleries<R: ImageRepository>(page: &GalleryPage<R>) -> Result<(), GenError> {
    page.initialize().await;

    let counts = page.store().counts(&page.config().tag_names());
    println!("📚 found {} galleries:", counts.len());
    for (tag, count) in counts {
        let title = page.config().tag(&tag).map(|t| t.display_title()).unwrap_or(&tag);
        println!("\t{} ({}): {} images", title, tag, count);
    }

    Ok(())
}

async fn show<R: ImageRepository>(page: &mut GalleryPage<R>, c: TagCmd) -> Result<(), GenError> {
    let title = configured_title(page, &c.tag)?;
    print!("{}", render_grid(&GridView::loading(&c.tag, &title)));

    page.initialize().await;
    if let Some(grid) = page.handle(PageEvent::OpenGallery(c.tag)).grid {
        print!("{}", render_grid(&grid));
    }

    Ok(())
}

async fn upload<R: ImageRepository>(page: &mut GalleryPage<R>, c: UploadCmd) -> Result<(), GenError> {
    let paths = match c.source {
        UploadSource::Folder(folder) => list_files(&folder)?,
        UploadSource::Files(files) => files,
    };
    let files = read_upload_files(&paths)?;
    println!("loaded {} photos", files.len());

    page.initialize().await;
    page.select_files(files);

    let mut out = stdout();
    let outcome = page.upload(&c.tag, |done, total| {
        print_progress(&mut out, done, total);
    }).await;
    println!();

    match outcome {
        UploadOutcome::Completed(report) => {
            println!("✅ {}", page.view().status);
            if report.succeeded < report.attempted {
                println!("{} of {} files failed, see diagnostics", report.attempted - report.succeeded, report.attempted);
            }
            Ok(())
        }
        UploadOutcome::NoFiles | UploadOutcome::UnknownTag(_) => Err(GenError::from(page.view().status)),
    }
}
