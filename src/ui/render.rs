//! Text rendering of ledger listings, balances and mutation reports
//!
//! Every function returns whole lines, each terminated by a newline. With
//! color enabled, signed numbers are green (surplus) or red (deficit).

use std::fmt::Write;

use crossterm::style::Stylize;

use crate::core::error::Warning;
use crate::core::types::{Amount, GroupIndex, Net};
use crate::economy::balance::to_net;
use crate::economy::good::Good;
use crate::ledger::{AssociateOutcome, Cascade, CityDetail, GroupDetail, Listing, UnassociateOutcome};

/// Formats ledger output, optionally with ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    pub color: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Plain-text renderer
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// `+N`, `-N` or `0`
    pub fn signed(&self, value: Net) -> String {
        if value == 0 {
            return "0".to_string();
        }
        let text = if value > 0 {
            format!("+{}", value)
        } else {
            value.to_string()
        };
        match (self.color, value > 0) {
            (false, _) => text,
            (true, true) => text.green().to_string(),
            (true, false) => text.red().to_string(),
        }
    }

    fn good_name(&self, good: Good, produced: bool) -> String {
        match (self.color, produced) {
            (false, _) => good.to_string(),
            (true, true) => good.to_string().green().to_string(),
            (true, false) => good.to_string().red().to_string(),
        }
    }

    /// `(+produced/-consumed)`
    fn gross(&self, produced: Amount, consumed: Amount) -> String {
        format!(
            "({}/{})",
            self.signed(to_net(produced)),
            self.signed(-to_net(consumed))
        )
    }

    /// Every group with its members, then every city
    pub fn listing(&self, listing: &Listing) -> String {
        let mut out = String::new();
        for (index, cities) in &listing.groups {
            let _ = writeln!(out, "Group [{}]:", index);
            for city in cities {
                let _ = writeln!(out, "* [{}]", city);
            }
            out.push('\n');
        }
        if !listing.cities.is_empty() {
            out.push_str("Cities:\n");
            for city in &listing.cities {
                let _ = writeln!(out, "* [{}]", city);
            }
        }
        out
    }

    /// A city's buildings with their balances, then goods it only consumes
    pub fn city_detail(&self, detail: &CityDetail) -> String {
        let balance = &detail.balance;
        let mut out = format!("City [{}]:\n", detail.name);

        for (&good, &count) in &detail.buildings {
            let produced = balance.produced(good);
            let consumed = balance.consumed(good);
            let _ = write!(out, "\t{}({}): ", self.good_name(good, true), count);
            if consumed == 0 {
                let _ = writeln!(out, "{}", self.signed(to_net(produced)));
            } else {
                let _ = writeln!(
                    out,
                    "{} {}",
                    self.signed(balance.net(good)),
                    self.gross(produced, consumed)
                );
            }
        }

        for good in balance.goods() {
            let consumed = balance.consumed(good);
            if consumed == 0 || detail.buildings.contains_key(&good) {
                continue;
            }
            let _ = writeln!(
                out,
                "\t{}: {}",
                self.good_name(good, false),
                self.signed(-to_net(consumed))
            );
        }
        out
    }

    /// Each member city, then the group's summed balances
    pub fn group_detail(&self, detail: &GroupDetail) -> String {
        let mut out = String::new();
        for city in &detail.cities {
            out.push_str(&self.city_detail(city));
        }

        let totals = &detail.totals;
        let _ = writeln!(out, "Group [{}] balances:", detail.index);
        for good in totals.goods() {
            let _ = write!(out, "\t{}: {}", good, self.signed(totals.net(good)));
            let buildings = totals.buildings_of(good);
            if buildings > 0 {
                let _ = write!(out, "({})", buildings);
            }
            let _ = writeln!(
                out,
                " {}",
                self.gross(totals.produced(good), totals.consumed(good))
            );
        }
        out
    }

    pub fn warnings(&self, warnings: &[Warning]) -> String {
        warnings.iter().map(|w| format!("{}\n", w)).collect()
    }

    /// Report of what a removal took with it
    pub fn cascade(&self, city: &str, cascade: &Cascade) -> String {
        let mut out = String::new();
        if cascade.city_removed {
            let _ = writeln!(out, "City [{}] removed", city);
        }
        out.push_str(&self.groups_removed(&cascade.groups_removed));
        out
    }

    pub fn groups_removed(&self, groups: &[GroupIndex]) -> String {
        groups
            .iter()
            .map(|index| format!("Group [{}] removed\n", index))
            .collect()
    }

    /// Member lists print space-separated inside brackets, `[A B]`
    pub fn associated(&self, index: GroupIndex, outcome: &AssociateOutcome) -> String {
        let mut out = self.warnings(&outcome.warnings);
        if !outcome.added.is_empty() {
            let _ = writeln!(
                out,
                "Group [{}] associated with cities: [{}]",
                index,
                outcome.added.join(" ")
            );
        }
        out
    }

    pub fn unassociated(&self, index: GroupIndex, outcome: &UnassociateOutcome) -> String {
        let mut out = self.warnings(&outcome.warnings);
        if !outcome.removed.is_empty() {
            let _ = writeln!(
                out,
                "Group [{}] unassociated with cities: [{}]",
                index,
                outcome.removed.join(" ")
            );
        }
        if outcome.group_removed {
            out.push_str(&self.groups_removed(&[index]));
        }
        out
    }
}
