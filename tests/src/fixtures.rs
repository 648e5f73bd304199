//! Inventory trees shared by the integration flows and the benchmarks.

use mapper_bus::InMemoryBus;
use mapper_client::{InMemoryObjectMapper, MapperClient, MapperConfig};
use mapper_types::ObjectPath;
use std::sync::Arc;

pub const INVENTORY_MANAGER: &str = "xyz.openbmc_project.Inventory.Manager";
pub const FAN_SENSOR: &str = "xyz.openbmc_project.FanSensor";
pub const ITEM_FAN: &str = "xyz.openbmc_project.Inventory.Item.Fan";
pub const ITEM_PSU: &str = "xyz.openbmc_project.Inventory.Item.PowerSupply";
pub const ITEM_CHASSIS: &str = "xyz.openbmc_project.Inventory.Item.Chassis";
pub const SENSOR_VALUE: &str = "xyz.openbmc_project.Sensor.Value";

pub const INVENTORY: &str = "/xyz/openbmc_project/inventory";
pub const SYSTEM: &str = "/xyz/openbmc_project/inventory/system";
pub const CHASSIS: &str = "/xyz/openbmc_project/inventory/system/chassis";
/// Association naming the fans that cool the chassis.
pub const COOLED_BY: &str = "/xyz/openbmc_project/inventory/system/chassis/cooled_by";
/// Association naming the power supplies of the chassis.
pub const POWERED_BY: &str = "/xyz/openbmc_project/inventory/system/chassis/powered_by";

/// Parse a path known to be valid.
///
/// # Panics
///
/// When `s` is not a valid object path.
#[allow(clippy::expect_used)]
pub fn path(s: &str) -> ObjectPath {
    ObjectPath::new(s).expect("fixture path is valid")
}

/// Fan `index` below the chassis.
pub fn fan(index: usize) -> ObjectPath {
    path(&format!("{}/fan{}", CHASSIS, index))
}

/// Power supply `index` below the system.
pub fn psu(index: usize) -> ObjectPath {
    path(&format!("{}/powersupply{}", SYSTEM, index))
}

/// A chassis with `fans` fans and `psus` power supplies.
///
/// `cooled_by` names every even fan plus one fan that does not exist;
/// `powered_by` names every power supply.
pub fn chassis(fans: usize, psus: usize) -> InMemoryObjectMapper {
    let mapper = InMemoryObjectMapper::new();
    mapper.add_object(path(SYSTEM), INVENTORY_MANAGER, &[]);
    mapper.add_object(path(CHASSIS), INVENTORY_MANAGER, &[ITEM_CHASSIS]);

    for i in 0..fans {
        mapper.add_object(fan(i), INVENTORY_MANAGER, &[ITEM_FAN]);
        mapper.add_object(fan(i), FAN_SENSOR, &[SENSOR_VALUE]);
    }
    for i in 0..psus {
        mapper.add_object(psu(i), INVENTORY_MANAGER, &[ITEM_PSU]);
    }

    let mut cooled_by: Vec<ObjectPath> = (0..fans).step_by(2).map(fan).collect();
    cooled_by.push(fan(fans + 100));
    mapper.set_association(path(COOLED_BY), cooled_by);
    mapper.set_association(path(POWERED_BY), (0..psus).map(psu).collect());
    mapper
}

/// Bus, mapper and client wired together.
pub struct Harness {
    pub bus: Arc<InMemoryBus>,
    pub mapper: InMemoryObjectMapper,
    pub client: MapperClient,
}

impl Harness {
    /// Attach `mapper` to a fresh `bus` and build a client with `config`.
    ///
    /// # Panics
    ///
    /// When `config` is invalid.
    #[allow(clippy::expect_used)]
    pub fn new(bus: InMemoryBus, mapper: InMemoryObjectMapper, config: &MapperConfig) -> Self {
        let bus = Arc::new(bus);
        mapper.attach(&bus);
        let client = MapperClient::new(bus.clone(), config).expect("fixture config is valid");
        Self {
            bus,
            mapper,
            client,
        }
    }

    /// A default-configured client over `chassis(fans, psus)`.
    pub fn chassis(fans: usize, psus: usize) -> Self {
        Self::new(InMemoryBus::new(), chassis(fans, psus), &MapperConfig::default())
    }
}
