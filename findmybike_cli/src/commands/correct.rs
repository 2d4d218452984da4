use anyhow::{bail, Result};
use clap::Args;
use findmybike_lib::types::Aspect;
use findmybike_lib::validation;
use findmybike_lib::{Client, CorrectionForm};

#[derive(Args)]
pub struct CorrectArgs {
    /// Id of the posting to correct
    #[arg(long)]
    pub posting_id: String,

    /// Correct bike type: bike, children, cargo
    #[arg(long)]
    pub bike: String,

    /// Correct frame: diamond, trapeze, swan_neck, low_entry, x, y
    #[arg(long)]
    pub frame: String,

    /// Correct color: black, white, gray, blue, red, yellow, green
    #[arg(long)]
    pub color: String,
}

pub async fn run(args: &CorrectArgs, client: &Client) -> Result<()> {
    let posting_id = validation::validate_posting_id(&args.posting_id)?;
    let mut form = CorrectionForm::new(posting_id);
    form.set_field(Aspect::Bike, &args.bike)?;
    form.set_field(Aspect::Frame, &args.frame)?;
    form.set_field(Aspect::Color, &args.color)?;

    if !form.can_submit() {
        bail!("bike, frame and color are all required for a correction");
    }

    if let Err(e) = form.submit(client).await {
        bail!("correction for posting {} was not saved: {}", form.posting_id(), e);
    }

    let draft = form.draft();
    eprintln!(
        "Correction saved for posting {}: {} / {} / {}",
        form.posting_id(),
        draft.field(Aspect::Bike),
        draft.field(Aspect::Frame),
        draft.field(Aspect::Color)
    );
    Ok(())
}
