use actix_cors::Cors;
use actix_web::http::{header, uri::Uri};
use log::{info, warn};
use std::{
    fs::File,
    io::{BufRead, BufReader, Error as IOError, ErrorKind},
};

/// Reads one origin per line, skipping blanks and lines that are not
/// `scheme://host[:port]` URIs (a bare `*` is skipped too). Fails only if the file cannot be read or no line survives validation.
pub fn load_and_validate_cors_origins(path: &str) -> Result<Vec<String>, IOError> {
    let file = File::open(path)?;
    let buf_reader = BufReader::new(file);
    let mut origins = Vec::new();
    let mut all_lines_failed = true;

    for line in buf_reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<Uri>() {
            Ok(uri) if uri.scheme().is_some() && uri.host().is_some() => {
                origins.push(line.to_string());
                all_lines_failed = false;
            }
            Ok(_) => {
                warn!("CORS origin {:?} needs a scheme and host, skipping", line);
            }
            Err(e) => {
                warn!("Invalid URI in CORS configuration: {}", e);
            }
        }
    }

    if all_lines_failed {
        return Err(IOError::new(
            ErrorKind::InvalidData,
            "All CORS lines failed validation.",
        ));
    }

    Ok(origins)
}

/// Resolves the allowed origins once at startup; an empty list means permissive.
pub fn resolve_origins(path: &str) -> Vec<String> {
    match load_and_validate_cors_origins(path) {
        Ok(origins) => {
            info!("CORS origins loaded from {}: {:?}", path, origins);
            origins
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("{} not found, allowing any origin", path);
            Vec::new()
        }
        Err(e) => {
            warn!("Failed to load CORS origins from {}: {}, allowing any origin", path, e);
            Vec::new()
        }
    }
}

pub fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }

    // The store endpoint accepts every method, so the CORS layer does too.
    let cors = Cors::default()
        .allow_any_method()
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600);

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
