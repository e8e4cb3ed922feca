//! Movement-ledger plumbing shared by the order, shipment and transfer
//! services. All three parent kinds write to the same `stocks` table; rows
//! are addressed through [`LedgerParent`] so a line can never belong to two
//! parents.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::stock::{self, Entity as StockEntity, LedgerParent, StockLine, StockParentKind};

/// Inserts the given lines, each stamped with the parent's kind and id.
pub(crate) async fn attach_lines<C: ConnectionTrait>(
    db: &C,
    parent: LedgerParent,
    lines: &[StockLine],
) -> Result<(), DbErr> {
    if lines.is_empty() {
        return Ok(());
    }

    let rows = lines.iter().map(|line| stock::ActiveModel {
        parent_kind: Set(parent.kind()),
        parent_id: Set(parent.id()),
        item_id: Set(line.item_id.clone()),
        quantity: Set(line.quantity),
        ..Default::default()
    });

    StockEntity::insert_many(rows).exec(db).await?;
    Ok(())
}

/// Replaces the parent's entire line set. Existing lines are discarded and
/// the new list inserted; there is no line-level diffing, so omitting a
/// line removes it.
pub(crate) async fn replace_lines<C: ConnectionTrait>(
    db: &C,
    parent: LedgerParent,
    lines: &[StockLine],
) -> Result<(), DbErr> {
    StockEntity::delete_many()
        .filter(stock::Column::ParentKind.eq(parent.kind()))
        .filter(stock::Column::ParentId.eq(parent.id()))
        .exec(db)
        .await?;

    attach_lines(db, parent, lines).await
}

/// Lines for one parent, in insertion order.
pub(crate) async fn load_lines<C: ConnectionTrait>(
    db: &C,
    parent: LedgerParent,
) -> Result<Vec<StockLine>, DbErr> {
    let rows = StockEntity::find()
        .filter(stock::Column::ParentKind.eq(parent.kind()))
        .filter(stock::Column::ParentId.eq(parent.id()))
        .order_by_asc(stock::Column::Id)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(StockLine::from).collect())
}

/// Lines for many parents of one kind, grouped by parent id. Used by list
/// reads to avoid a query per row.
pub(crate) async fn load_lines_grouped<C: ConnectionTrait>(
    db: &C,
    kind: StockParentKind,
    parent_ids: &[i32],
) -> Result<HashMap<i32, Vec<StockLine>>, DbErr> {
    if parent_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = StockEntity::find()
        .filter(stock::Column::ParentKind.eq(kind))
        .filter(stock::Column::ParentId.is_in(parent_ids.iter().copied()))
        .order_by_asc(stock::Column::Id)
        .all(db)
        .await?;

    let mut grouped: HashMap<i32, Vec<StockLine>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.parent_id)
            .or_default()
            .push(StockLine::from(row));
    }
    Ok(grouped)
}

/// Raw ledger rows for many parents of one kind; reporting reads the
/// quantities without caring about per-parent grouping.
pub(crate) async fn sum_quantities<C: ConnectionTrait>(
    db: &C,
    kind: StockParentKind,
    parent_ids: &[i32],
) -> Result<i64, DbErr> {
    if parent_ids.is_empty() {
        return Ok(0);
    }

    let rows = StockEntity::find()
        .filter(stock::Column::ParentKind.eq(kind))
        .filter(stock::Column::ParentId.is_in(parent_ids.iter().copied()))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|row| i64::from(row.quantity)).sum())
}
