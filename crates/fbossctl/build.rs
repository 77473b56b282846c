#[cfg(feature = "generate-completions")]
mod generate {
    use std::{
        env,
        ffi::OsStr,
        fs,
        io::{self, Result},
        path::PathBuf,
    };

    use clap_complete::{generate_to, shells::Shell, Generator};
    use clap_mangen::Man;

    fn out_dir() -> io::Result<PathBuf> {
        env::var_os("OUT_DIR")
            .map(PathBuf::from)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR not set"))
    }

    fn generate_man_page() -> Result<()> {
        let cmd = fbossctl_commands::command::build_cli();

        let man = Man::new(cmd);
        let mut buffer = Vec::new();
        man.render(&mut buffer)?;

        let file_path = out_dir()?.join("fbossctl.1");
        fs::write(&file_path, &buffer)?;

        eprintln!("Man page generated at {file_path:?}");
        Ok(())
    }

    fn generate_one_completion<G, P>(generator: G, out_dir: P, bin_name: &str) -> Result<()>
    where
        G: Generator + Copy,
        P: AsRef<OsStr>,
    {
        let mut cmd = fbossctl_commands::command::build_cli();
        generate_to(generator, &mut cmd, bin_name, &out_dir)?;
        Ok(())
    }

    fn generate_all_completions() -> Result<()> {
        let out_dir = out_dir()?;
        let shells = [
            Shell::Bash,
            Shell::Elvish,
            Shell::Fish,
            Shell::PowerShell,
            Shell::Zsh,
        ];

        for shell in shells {
            generate_one_completion(shell, &out_dir, "fbossctl")?;
        }

        eprintln!("Completion scripts generated at {out_dir:?}");
        Ok(())
    }

    pub fn run() -> Result<()> {
        generate_all_completions()?;
        generate_man_page()
    }
}

fn main() -> std::io::Result<()> {
    #[cfg(feature = "generate-completions")]
    generate::run()?;
    Ok(())
}
