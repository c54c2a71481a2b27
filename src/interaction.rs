use crate::config::INTERACTION_DISTANCE;
use crate::engine::Point;
use crate::inventory::InventoryObserver;
use crate::world::{ObstacleKind, Session};

/// What a single interact press took out of the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harvested {
    pub kind: ObstacleKind,
    pub position: Point,
}

/// Harvest everything in reach that the player has the tool for
/// - trees first, then rocks
/// - no cap per press, every obstacle in range goes
/// - tools gate, they are never used up
pub fn harvest(session: &mut Session, observer: &mut dyn InventoryObserver) -> Vec<Harvested> {
    let player = session.player.position;
    let mut harvested = Vec::new();

    for group in [&mut session.trees, &mut session.rocks] {
        let kind = group.kind();
        if !session.inventory.has(kind.tool()) {
            continue;
        }

        let in_reach =
            group.take_where(|obstacle| player.distance(obstacle.position()) < INTERACTION_DISTANCE);
        for obstacle in in_reach {
            let resource = kind.resource();
            session.inventory.add(resource);
            observer.on_inventory_changed(&session.inventory);
            observer.on_item_collected(resource);
            harvested.push(Harvested {
                kind,
                position: obstacle.position(),
            });
        }
    }
    harvested
}
