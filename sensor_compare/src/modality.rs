//! Descriptors of the sensor modalities recorded by both devices.
//!
//! Column names match the CSV exports of each device. Everything that differs
//! between accelerometer, gyroscope and magnetometer lives here so the
//! pipeline stays generic.

use units::UnitConversion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Device {
    Phone,
    Microcontroller,
}

impl Device {
    /// Legend label
    pub const fn label(self) -> &'static str {
        match self {
            Device::Phone => "Phone",
            Device::Microcontroller => "Arduino",
        }
    }

    /// Title label
    pub const fn long_label(self) -> &'static str {
        match self {
            Device::Phone => "Smartphone",
            Device::Microcontroller => "Arduino",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Device::Phone => "phone",
            Device::Microcontroller => "arduino",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModalityKind {
    Accelerometer,
    Gyroscope,
    Magnetometer,
}

/// Derived columns holding samples converted to the comparison unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub kind: UnitConversion,
    pub columns: [&'static str; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceColumns {
    pub device: Device,
    pub time: &'static str,
    pub axes: [&'static str; 3],
    /// Unit of the raw samples
    pub unit: &'static str,
    /// Name of the underlying sensor if it differs from the modality, e.g. "Gravity"
    pub sensor_label: Option<&'static str>,
    pub conversion: Option<Conversion>,
}

impl DeviceColumns {
    /// Columns compared against the other device
    pub const fn comparison_axes(&self) -> [&'static str; 3] {
        match self.conversion {
            Some(Conversion { columns, .. }) => columns,
            None => self.axes,
        }
    }

    pub const fn z_axis(&self) -> &'static str {
        self.comparison_axes()[2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modality {
    pub kind: ModalityKind,
    pub name: &'static str,
    /// File name prefix of charts
    pub slug: &'static str,
    pub quantity: &'static str,
    /// Comparison unit
    pub unit: &'static str,
    pub phone: DeviceColumns,
    pub microcontroller: DeviceColumns,
}

pub const AXIS_LABELS: [&str; 3] = ["X", "Y", "Z"];

pub const ACCELEROMETER: Modality = Modality {
    kind: ModalityKind::Accelerometer,
    name: "Accelerometer",
    slug: "acc",
    quantity: "Acceleration",
    unit: "m/s^2",
    phone: DeviceColumns {
        device: Device::Phone,
        time: "Time (s)",
        axes: [
            "Gravity X (m/s^2)",
            "Gravity Y (m/s^2)",
            "Gravity Z (m/s^2)",
        ],
        unit: "m/s^2",
        sensor_label: Some("Gravity"),
        conversion: None,
    },
    microcontroller: DeviceColumns {
        device: Device::Microcontroller,
        time: "Time t (s)",
        axes: [
            "Acceleration x (g)",
            "Acceleration y (g)",
            "Acceleration z (g)",
        ],
        unit: "g",
        sensor_label: None,
        conversion: Some(Conversion {
            kind: UnitConversion::GravityToMetersPerSecondSquared,
            columns: ["Ax_mps2", "Ay_mps2", "Az_mps2"],
        }),
    },
};

pub const GYROSCOPE: Modality = Modality {
    kind: ModalityKind::Gyroscope,
    name: "Gyroscope",
    slug: "gyro",
    quantity: "Angular velocity",
    unit: "rad/s",
    phone: DeviceColumns {
        device: Device::Phone,
        time: "Time (s)",
        axes: [
            "Gyroscope x (rad/s)",
            "Gyroscope y (rad/s)",
            "Gyroscope z (rad/s)",
        ],
        unit: "rad/s",
        sensor_label: None,
        conversion: None,
    },
    microcontroller: DeviceColumns {
        device: Device::Microcontroller,
        time: "Time t (s)",
        axes: [
            "Angular Velocity x (rad/s)",
            "Angular Velocity y (rad/s)",
            "Angular Velocity z (rad/s)",
        ],
        unit: "rad/s",
        sensor_label: None,
        conversion: None,
    },
};

pub const MAGNETOMETER: Modality = Modality {
    kind: ModalityKind::Magnetometer,
    name: "Magnetometer",
    slug: "mag",
    quantity: "Magnetic field",
    unit: "µT",
    phone: DeviceColumns {
        device: Device::Phone,
        time: "Time (s)",
        axes: [
            "Magnetic Field x (µT)",
            "Magnetic Field y (µT)",
            "Magnetic Field z (µT)",
        ],
        unit: "µT",
        sensor_label: None,
        conversion: None,
    },
    microcontroller: DeviceColumns {
        device: Device::Microcontroller,
        time: "Time t (s)",
        axes: [
            "Magnetometer x (µT)",
            "Magnetometer y (µT)",
            "Magnetometer z (µT)",
        ],
        unit: "µT",
        sensor_label: None,
        conversion: None,
    },
};

impl Modality {
    pub const ALL: [Modality; 3] = [ACCELEROMETER, GYROSCOPE, MAGNETOMETER];

    pub const fn device(&self, device: Device) -> &DeviceColumns {
        match device {
            Device::Phone => &self.phone,
            Device::Microcontroller => &self.microcontroller,
        }
    }

    /// Y axis label of time series, e.g. "Acceleration (m/s^2)"
    pub fn value_label(&self) -> String {
        format!("{} ({})", self.quantity, self.unit)
    }

    pub fn timeseries_title(&self, device: Device) -> String {
        let columns = self.device(device);

        let mut title = format!("{} {}", device.long_label(), self.name);

        if let Some(sensor) = columns.sensor_label {
            title.push_str(&format!(" ({sensor})"));
        }

        title.push_str(" – Time Series");

        if let Some(unit) = columns.conversion.and_then(|this| this.kind.target_unit()) {
            title.push_str(&format!(" (converted to {unit})"));
        }

        title
    }

    pub fn histogram_title(&self) -> String {
        format!(
            "{} Z-axis Distribution – {} vs {}",
            self.name,
            Device::Phone.label(),
            Device::Microcontroller.label()
        )
    }

    pub fn histogram_label(&self) -> String {
        format!("Z {} ({})", self.quantity.to_lowercase(), self.unit)
    }

    pub fn std_title(&self) -> String {
        format!(
            "{} Noise (Std Dev) – {} vs {}",
            self.name,
            Device::Phone.label(),
            Device::Microcontroller.label()
        )
    }

    pub fn std_label(&self) -> String {
        format!("Std dev ({})", self.unit)
    }

    pub fn timeseries_file(&self, device: Device) -> String {
        format!("{}_{}_timeseries.png", self.slug, device.slug())
    }

    pub fn histogram_file(&self) -> String {
        format!("{}_z_hist.png", self.slug)
    }

    pub fn std_file(&self) -> String {
        format!("{}_std_bar.png", self.slug)
    }
}
