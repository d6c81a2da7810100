//! Compiled-in reference data: buildings, floors, areas and the tracked
//! identifiers with their human-readable aliases.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Building {
    pub id: &'static str,
    pub display_name: &'static str,
    pub floors: &'static [Floor],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Floor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub areas: &'static [Area],
    pub identifiers: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub id: &'static str,
    pub display_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierAlias {
    pub identifier: &'static str,
    pub alias: &'static str,
    pub building: &'static str,
    pub floor: &'static str,
}

const fn area(id: &'static str, display_name: &'static str) -> Area {
    Area { id, display_name }
}

const fn alias(
    identifier: &'static str,
    alias: &'static str,
    building: &'static str,
    floor: &'static str,
) -> IdentifierAlias {
    IdentifierAlias {
        identifier,
        alias,
        building,
        floor,
    }
}

static BUILDINGS: [Building; 3] = [
    Building {
        id: "building-a",
        display_name: "Building A",
        floors: &[
            Floor {
                id: "floor-1",
                display_name: "1F",
                areas: &[
                    area("area-entrance", "Entrance"),
                    area("area-lobby", "Lobby"),
                    area("area-elevator", "Elevator Hall"),
                ],
                identifiers: &["GUID-A1-001", "GUID-A1-002", "GUID-A1-003", "GUID-A1-004"],
            },
            Floor {
                id: "floor-2",
                display_name: "2F",
                areas: &[
                    area("area-office", "Office"),
                    area("area-meeting", "Meeting Room"),
                    area("area-break", "Break Room"),
                ],
                identifiers: &[
                    "GUID-A2-001",
                    "GUID-A2-002",
                    "GUID-A2-003",
                    "GUID-A2-004",
                    "GUID-A2-005",
                ],
            },
            Floor {
                id: "floor-3",
                display_name: "3F",
                areas: &[
                    area("area-dev", "Development Room"),
                    area("area-server", "Server Room"),
                    area("area-storage", "Storage"),
                ],
                identifiers: &["GUID-A3-001", "GUID-A3-002", "GUID-A3-003"],
            },
        ],
    },
    Building {
        id: "building-b",
        display_name: "Building B",
        floors: &[
            Floor {
                id: "floor-1",
                display_name: "1F",
                areas: &[
                    area("area-cafe", "Cafe"),
                    area("area-shop", "Shop"),
                    area("area-entrance-b", "Entrance"),
                ],
                identifiers: &["GUID-B1-001", "GUID-B1-002", "GUID-B1-003"],
            },
            Floor {
                id: "floor-2",
                display_name: "2F",
                areas: &[
                    area("area-restaurant", "Restaurant"),
                    area("area-kitchen", "Kitchen"),
                ],
                identifiers: &["GUID-B2-001", "GUID-B2-002", "GUID-B2-003", "GUID-B2-004"],
            },
        ],
    },
    Building {
        id: "building-c",
        display_name: "Building C",
        floors: &[Floor {
            id: "floor-1",
            display_name: "1F",
            areas: &[
                area("area-gym", "Gym"),
                area("area-pool", "Pool"),
                area("area-locker", "Locker Room"),
            ],
            identifiers: &["GUID-C1-001", "GUID-C1-002", "GUID-C1-003", "GUID-C1-004"],
        }],
    },
];

static ALIASES: [IdentifierAlias; 23] = [
    alias("GUID-A1-001", "Receptionist", "building-a", "floor-1"),
    alias("GUID-A1-002", "Security Guard", "building-a", "floor-1"),
    alias("GUID-A1-003", "Cleaner", "building-a", "floor-1"),
    alias("GUID-A1-004", "Visitor A", "building-a", "floor-1"),
    alias("GUID-A2-001", "Sales Director", "building-a", "floor-2"),
    alias("GUID-A2-002", "Sales Rep A", "building-a", "floor-2"),
    alias("GUID-A2-003", "Sales Rep B", "building-a", "floor-2"),
    alias("GUID-A2-004", "Manager", "building-a", "floor-2"),
    alias("GUID-A2-005", "Assistant", "building-a", "floor-2"),
    alias("GUID-A3-001", "Dev Lead", "building-a", "floor-3"),
    alias("GUID-A3-002", "Engineer A", "building-a", "floor-3"),
    alias("GUID-A3-003", "Engineer B", "building-a", "floor-3"),
    alias("GUID-B1-001", "Store Manager", "building-b", "floor-1"),
    alias("GUID-B1-002", "Staff A", "building-b", "floor-1"),
    alias("GUID-B1-003", "Staff B", "building-b", "floor-1"),
    alias("GUID-B2-001", "Chef", "building-b", "floor-2"),
    alias("GUID-B2-002", "Cook", "building-b", "floor-2"),
    alias("GUID-B2-003", "Waiter", "building-b", "floor-2"),
    alias("GUID-B2-004", "Clerk", "building-b", "floor-2"),
    alias("GUID-C1-001", "Trainer A", "building-c", "floor-1"),
    alias("GUID-C1-002", "Trainer B", "building-c", "floor-1"),
    alias("GUID-C1-003", "Staff", "building-c", "floor-1"),
    alias("GUID-C1-004", "Member", "building-c", "floor-1"),
];

pub fn buildings() -> &'static [Building] {
    &BUILDINGS
}

pub fn aliases() -> &'static [IdentifierAlias] {
    &ALIASES
}

pub fn building(id: &str) -> Option<&'static Building> {
    BUILDINGS.iter().find(|building| building.id == id)
}

pub fn floor(building_id: &str, floor_id: &str) -> Option<&'static Floor> {
    building(building_id)?
        .floors
        .iter()
        .find(|floor| floor.id == floor_id)
}

/// Floors of a building, empty when the building is not in the catalog.
pub fn floors_for(building_id: &str) -> &'static [Floor] {
    building(building_id).map_or(&[][..], |building| building.floors)
}

pub fn areas_for(building_id: &str, floor_id: &str) -> &'static [Area] {
    floor(building_id, floor_id).map_or(&[][..], |floor| floor.areas)
}

/// Identifiers registered on a floor, derived from the alias table.
pub fn identifiers_for(building_id: &str, floor_id: &str) -> Vec<&'static str> {
    ALIASES
        .iter()
        .filter(|entry| entry.building == building_id && entry.floor == floor_id)
        .map(|entry| entry.identifier)
        .collect()
}

/// Alias of an identifier, or the identifier itself when it has none.
pub fn alias_of(identifier: &str) -> &str {
    ALIASES
        .iter()
        .find(|entry| entry.identifier == identifier)
        .map_or(identifier, |entry| entry.alias)
}

/// `"<identifier> (<alias>)"`, the label used across tables and legends.
pub fn labelled(identifier: &str) -> String {
    format!("{identifier} ({})", alias_of(identifier))
}

pub fn area_name(building_id: &str, floor_id: &str, area_id: &str) -> Option<&'static str> {
    areas_for(building_id, floor_id)
        .iter()
        .find(|area| area.id == area_id)
        .map(|area| area.display_name)
}
