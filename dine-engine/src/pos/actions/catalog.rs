//! Menu and table catalog actions

use crate::pos::catalog;
use crate::pos::error::PosResult;
use crate::pos::traits::{CommandContext, CommandHandler};
use shared::models::{DiningTableUpdate, MenuItemUpdate};
use shared::order::CommandOutcome;

#[derive(Debug, Clone)]
pub struct AddMenuItemAction;

impl CommandHandler for AddMenuItemAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let item_id = catalog::add_menu_item(ctx.store);
        Ok(CommandOutcome::MenuItemAdded { item_id })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateMenuItemAction {
    pub item_id: i64,
    pub update: MenuItemUpdate,
}

impl CommandHandler for UpdateMenuItemAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        catalog::update_menu_item(ctx.store, self.item_id, &self.update)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteMenuItemAction {
    pub item_id: i64,
}

impl CommandHandler for DeleteMenuItemAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        catalog::delete_menu_item(ctx.store, self.item_id)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct AddTableAction;

impl CommandHandler for AddTableAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let table_id = catalog::add_table(ctx.store);
        Ok(CommandOutcome::TableAdded { table_id })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTableAction {
    pub table_id: i64,
    pub update: DiningTableUpdate,
}

impl CommandHandler for UpdateTableAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        catalog::update_table(ctx.store, self.table_id, &self.update)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteTableAction {
    pub table_id: i64,
}

impl CommandHandler for DeleteTableAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        catalog::delete_table(ctx.store, self.table_id)?;
        Ok(CommandOutcome::Done)
    }
}
