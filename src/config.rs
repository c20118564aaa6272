//! Defaults and run-time parameter resolution.

use crate::adapter::Dimensions;
use crate::float_types::{INCH, Real};
use crate::prompt::Prompter;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// One inch plate.
pub const DEFAULT_THICKNESS: Real = INCH;
pub const DEFAULT_OUTER_RADIUS: Real = 180.0;
pub const DEFAULT_CENTER_BORE_RADIUS: Real = 60.0;
pub const DEFAULT_BOLT_RADIUS: Real = 5.0;

pub const DEFAULT_OUTPUT_NAME: &str = "SBC_to_AX15_adapter.stl";

pub const PROMPT_BANNER: &str =
    "\nEnter dimensions in millimeters. Press Enter to accept the default.\n";

/// Dimensions fixed ahead of time (e.g. from the command line). `None`
/// entries are asked for interactively.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionOverrides {
    pub thickness: Option<Real>,
    pub outer_radius: Option<Real>,
    pub center_bore_radius: Option<Real>,
    pub bolt_radius: Option<Real>,
}

impl DimensionOverrides {
    /// `true` when every dimension is already known.
    pub const fn is_complete(&self) -> bool {
        self.thickness.is_some()
            && self.outer_radius.is_some()
            && self.center_bore_radius.is_some()
            && self.bolt_radius.is_some()
    }
}

/// Fill in every dimension not given in `overrides` by prompting, in the
/// order thickness, outer radius, center bore radius, bolt radius.
///
/// The banner is shown only when at least one prompt follows.
///
/// # Errors
/// I/O errors from the prompter, including end of input.
pub fn resolve_dimensions<R: BufRead, W: Write>(
    overrides: &DimensionOverrides,
    prompter: &mut Prompter<R, W>,
) -> io::Result<Dimensions> {
    if !overrides.is_complete() {
        prompter.say(PROMPT_BANNER)?;
    }

    let mut ask = |given: Option<Real>, label: &str, default: Real| match given {
        Some(value) => Ok(value),
        None => prompter.prompt_float(label, default),
    };

    let thickness = ask(overrides.thickness, "THICKNESS", DEFAULT_THICKNESS)?;
    let outer_radius = ask(overrides.outer_radius, "OUTER_RADIUS", DEFAULT_OUTER_RADIUS)?;
    let center_bore_radius = ask(
        overrides.center_bore_radius,
        "CENTER_BORE_RADIUS",
        DEFAULT_CENTER_BORE_RADIUS,
    )?;
    let bolt_radius = ask(overrides.bolt_radius, "BOLT_RADIUS", DEFAULT_BOLT_RADIUS)?;

    Ok(Dimensions::new(
        thickness,
        outer_radius,
        center_bore_radius,
        bolt_radius,
    ))
}

/// The user's home directory, from `HOME` or, failing that, `USERPROFILE`.
pub fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(std::env::var_os)
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// `<home>/Desktop` if it exists, otherwise the current working directory.
///
/// # Errors
/// If the current working directory cannot be determined.
pub fn desktop_dir() -> io::Result<PathBuf> {
    desktop_dir_in(home_dir().as_deref())
}

fn desktop_dir_in(home: Option<&Path>) -> io::Result<PathBuf> {
    match home.map(|h| h.join("Desktop")) {
        Some(desktop) if desktop.is_dir() => Ok(desktop),
        _ => std::env::current_dir(),
    }
}

/// The directory the STL is written to: `explicit` if given, else
/// [`desktop_dir`].
///
/// # Errors
/// See [`desktop_dir`].
pub fn resolve_output_dir(explicit: Option<PathBuf>) -> io::Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => desktop_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn enter_at_every_prompt_gives_defaults() {
        let mut p = prompter("\n\n\n\n");
        let dims = resolve_dimensions(&DimensionOverrides::default(), &mut p).unwrap();
        assert_eq!(dims, Dimensions::default());
        assert_eq!(
            dims,
            Dimensions::new(25.4, 180.0, 60.0, 5.0),
            "defaults are the documented values"
        );
    }

    #[test]
    fn complete_overrides_never_prompt() {
        let overrides = DimensionOverrides {
            thickness: Some(10.0),
            outer_radius: Some(150.0),
            center_bore_radius: Some(40.0),
            bolt_radius: Some(4.0),
        };
        let mut p = prompter("");
        let dims = resolve_dimensions(&overrides, &mut p).unwrap();
        assert_eq!(dims, Dimensions::new(10.0, 150.0, 40.0, 4.0));
        assert!(p.into_output().is_empty(), "nothing should be printed");
    }

    #[test]
    fn only_missing_dimensions_are_prompted() {
        let overrides = DimensionOverrides {
            outer_radius: Some(170.0),
            bolt_radius: Some(6.0),
            ..Default::default()
        };
        let mut p = prompter("20\n\n");
        let dims = resolve_dimensions(&overrides, &mut p).unwrap();
        assert_eq!(dims, Dimensions::new(20.0, 170.0, 60.0, 6.0));

        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("THICKNESS [25.4]: "));
        assert!(shown.contains("CENTER_BORE_RADIUS [60.0]: "));
        assert!(!shown.contains("OUTER_RADIUS ["));
        assert!(!shown.contains("BOLT_RADIUS"));
    }

    #[test]
    fn explicit_output_dir_wins() {
        let dir = PathBuf::from("/some/where");
        assert_eq!(resolve_output_dir(Some(dir.clone())).unwrap(), dir);
    }

    #[test]
    fn desktop_used_only_when_present() {
        let home = std::env::temp_dir().join(format!("adapter-plate-home-{}", std::process::id()));
        std::fs::create_dir_all(&home).unwrap();

        let fallback = desktop_dir_in(Some(&home)).unwrap();
        assert_eq!(fallback, std::env::current_dir().unwrap());

        let desktop = home.join("Desktop");
        std::fs::create_dir_all(&desktop).unwrap();
        assert_eq!(desktop_dir_in(Some(&home)).unwrap(), desktop);

        assert_eq!(desktop_dir_in(None).unwrap(), std::env::current_dir().unwrap());

        std::fs::remove_dir_all(&home).unwrap();
    }
}
