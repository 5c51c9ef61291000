//! A subcommand making sure the configuration and seed data are fine before
//! actually starting the server.

use std::io::{self, Write};
use termcolor::{StandardStream, WriteColor};

use crate::{
    args::{Args, Shared},
    load_config_and_init_logger,
    prelude::*,
    store::Seed,
};


pub(crate) async fn run(shared: &Shared, args: &Args) -> Result<()> {
    let config = load_config_and_init_logger(shared, args)
        .context("failed to load config: cannot proceed with `check` command")?;

    info!("Starting to verify various things...");
    let seed = Seed::load(&config.seed).await;
    info!("Done verifying various things");


    // Print summary after all log output
    let mut any_errors = false;
    println!();
    bunt::println!("{$bold+blue+intense}Summary{/$}");
    println!();
    let mut stdout = StandardStream::stdout(args.stdout_color());
    print_outcome(&mut stdout, &mut any_errors, "Load configuration", &Ok(()))?;
    print_outcome(&mut stdout, &mut any_errors, "Load seed data", &seed)?;

    if let Ok(seed) = &seed {
        let problems = seed.problems();
        if problems.is_empty() {
            bunt::println!(" ▸ {[bold+intense]}  {$green+bold}✔ ok{/$}", "Consistency of seed data");
        } else {
            bunt::println!(" ▸ {[bold+intense]}  {$yellow+bold}⚠ warning{/$}", "Consistency of seed data");
            for problem in problems {
                bunt::println!("      {$yellow}‣{/$} {}", problem);
            }
        }
    }

    println!();
    if any_errors {
        bunt::println!("{$red+intense}➡  Errors have occurred!{/$}");
        std::process::exit(1);
    } else {
        bunt::println!("{$green+intense}⮕  Everything OK{/$}");
        Ok(())
    }
}

fn print_outcome<T>(
    mut out: &mut impl WriteColor,
    any_errors: &mut bool,
    label: &str,
    result: &Result<T>,
) -> io::Result<()> {
    match result {
        Ok(_) => {
            bunt::writeln!(out, " ▸ {[bold+intense]}  {$green+bold}✔ ok{/$}", label)?;
        }
        Err(e) => {
            *any_errors = true;
            bunt::writeln!(out, " ▸ {[bold+intense]}  {$red+bold}✘ error{/$}", label)?;
            bunt::writeln!(out, "      {$red}▶▶▶ {$bold}Error:{/$}{/$} {[yellow+intense]}", e)?;
            writeln!(out)?;
            if e.chain().len() > 1 {
                bunt::writeln!(out, "      {$red+italic}Caused by:{/$}")?;
            }

            for (i, cause) in e.chain().skip(1).enumerate() {
                write!(out, "       {: >1$}", "", i * 2)?;
                writeln!(out, "‣ {cause}")?;
            }
            writeln!(out)?;
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use crate::prelude::*;
    use super::print_outcome;

    fn outcome(result: &Result<()>) -> (bool, String) {
        let mut out = NoColor::new(Vec::new());
        let mut any_errors = false;
        print_outcome(&mut out, &mut any_errors, "Thing", result).unwrap();
        (any_errors, String::from_utf8(out.into_inner()).unwrap())
    }

    #[test]
    fn ok_outcome() {
        let (any_errors, out) = outcome(&Ok(()));
        assert!(!any_errors);
        assert!(out.contains("Thing"));
        assert!(out.contains("✔ ok"));
    }

    #[test]
    fn error_without_cause() {
        let (any_errors, out) = outcome(&Err(anyhow!("broken")));
        assert!(any_errors);
        assert!(out.contains("Error: broken"));
        assert!(!out.contains("Caused by"));
    }

    #[test]
    fn error_with_cause() {
        let err = Err::<(), _>(anyhow!("no such file")).context("failed to read seed");
        let (any_errors, out) = outcome(&err);
        assert!(any_errors);
        assert!(out.contains("Error: failed to read seed"));
        assert!(out.contains("Caused by:"));
        assert!(out.contains("‣ no such file"));
    }
}
