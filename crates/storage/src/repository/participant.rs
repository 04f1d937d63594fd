use crate::Spreadsheet;
use crate::error::Result;
use crate::models::{ColumnLayout, Participant, WinStatus};
use crate::store::RowStore;

pub struct ParticipantRepository<'a> {
    sheet: &'a Spreadsheet,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(sheet: &'a Spreadsheet) -> Self {
        Self { sheet }
    }

    fn store(&self) -> &dyn RowStore {
        self.sheet.store()
    }

    /// Read the header row and resolve the configured columns against it
    pub async fn layout(&self) -> Result<ColumnLayout> {
        let header = self.store().header().await?;
        ColumnLayout::resolve(&header, self.sheet.columns())
    }

    /// List every registered participant, in sheet order
    pub async fn list(&self, layout: &ColumnLayout) -> Result<Vec<Participant>> {
        let records = self.store().read_all().await?;

        Ok(records
            .iter()
            .map(|record| layout.participant(record))
            .filter(|participant| !participant.email.is_empty())
            .collect())
    }

    /// List participants who have not won yet
    pub async fn list_eligible(&self, layout: &ColumnLayout) -> Result<Vec<Participant>> {
        let mut participants = self.list(layout).await?;
        participants.retain(Participant::is_eligible);
        Ok(participants)
    }

    /// Find the data row holding `email` (linear scan of the email column)
    pub async fn find_row(&self, layout: &ColumnLayout, email: &str) -> Result<Option<usize>> {
        self.store()
            .find_row_index(layout.email.index, email)
            .await
    }

    /// Append a participant row; the won-status cell is left blank
    pub async fn create(
        &self,
        layout: &ColumnLayout,
        name: &str,
        email: &str,
    ) -> Result<Participant> {
        self.store().append(&layout.new_row(name, email)).await?;

        Ok(Participant::new(name, email))
    }

    /// Set the won-status cell of the participant's row.
    ///
    /// Returns `false` when no row holds `email` anymore. Fails with
    /// `MissingColumn` before touching the store if the sheet has no
    /// won-status column.
    pub async fn mark_won(&self, layout: &ColumnLayout, email: &str) -> Result<bool> {
        let won = layout.require_won()?;

        let Some(row) = self.find_row(layout, email).await? else {
            return Ok(false);
        };

        self.store()
            .set_cell(row, won.index, WinStatus::Won.as_cell())
            .await?;

        Ok(true)
    }
}
