use anyhow::Result;
use vergen_gitcl::{BuildBuilder, Emitter, GitclBuilder};

fn main() -> Result<()> {
    let mut gitcl = GitclBuilder::default();
    gitcl.sha(true).branch(true);

    let build = BuildBuilder::all_build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&gitcl.build()?)?
        .emit()?;
    Ok(())
}
