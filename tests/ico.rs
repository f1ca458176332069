use pe_icon_util::ico::{build, split};
use pe_icon_util::{
    Error, GroupIconDirectory, IcoContainer, IconExtractor, MemoryResources, ResourceName,
};
use proptest::prelude::*;

/// A group icon whose entry `i` references icon id `i + 1`.
fn group_bytes(images: &[(u8, Vec<u8>)]) -> Vec<u8> {
    let mut bytes = vec![0, 0, 1, 0];
    bytes.extend_from_slice(&(images.len() as u16).to_le_bytes());
    for (i, (width, payload)) in images.iter().enumerate() {
        bytes.extend_from_slice(&[*width, *width, 0, 0, 1, 0, 32, 0]);
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&(i as u16 + 1).to_le_bytes());
    }
    bytes
}

fn images_strategy(min: usize) -> impl Strategy<Value = Vec<(u8, Vec<u8>)>> {
    prop::collection::vec(
        (any::<u8>(), prop::collection::vec(any::<u8>(), 0..64)),
        min..8,
    )
}

fn build_icon(images: &[(u8, Vec<u8>)]) -> IcoContainer {
    let directory = GroupIconDirectory::parse(&group_bytes(images)).unwrap();
    build(&directory, |id| Ok(images[id as usize - 1].1.as_slice())).unwrap()
}

proptest! {
    #[test]
    fn build_round_trip(images in images_strategy(0)) {
        let icon = build_icon(&images);
        let total: usize = images.iter().map(|(_, payload)| payload.len()).sum();

        prop_assert_eq!(icon.count() as usize, images.len());
        prop_assert_eq!(icon.len(), 6 + 16 * images.len() + total);
        for (i, (width, payload)) in images.iter().enumerate() {
            prop_assert_eq!(icon.image(i).unwrap(), payload.as_slice());
            prop_assert_eq!(icon.entries().unwrap()[i].prefix.as_bytes()[0], *width);
        }
    }

    #[test]
    fn offsets_follow_payload_sizes(images in images_strategy(0)) {
        let icon = build_icon(&images);
        let entries = icon.entries().unwrap();

        let mut expected = (6 + 16 * images.len()) as u32;
        for (entry, (_, payload)) in entries.iter().zip(&images) {
            prop_assert_eq!(entry.image_offset, expected);
            prop_assert_eq!(entry.bytes_in_res as usize, payload.len());
            expected += payload.len() as u32;
        }
    }

    #[test]
    fn split_yields_single_images(images in images_strategy(1)) {
        let icon = build_icon(&images);
        let parts = split(icon.as_bytes()).unwrap();

        prop_assert_eq!(parts.len(), images.len());
        for (part, (width, payload)) in parts.iter().zip(&images) {
            let entries = part.entries().unwrap();
            prop_assert_eq!(part.count(), 1);
            prop_assert_eq!(entries.len(), 1);
            prop_assert_eq!(entries[0].image_offset, 22);
            prop_assert_eq!(entries[0].prefix.as_bytes()[0], *width);
            prop_assert_eq!(part.image(0).unwrap(), payload.as_slice());
            prop_assert_eq!(part.len(), 22 + payload.len());
        }
    }
}

#[test]
fn mismatched_payload_returns_no_container() {
    let images = vec![(16u8, vec![1u8; 8]), (32u8, vec![2u8; 8])];
    let directory = GroupIconDirectory::parse(&group_bytes(&images)).unwrap();

    let result = build(&directory, |id| match id {
        1 => Ok(vec![1u8; 8]),
        _ => Ok(vec![2u8; 7]),
    });

    assert_eq!(
        result,
        Err(Error::PayloadSizeMismatch {
            id: 2,
            declared: 8,
            actual: 7
        })
    );
}

#[test]
fn truncated_group_directory() {
    let images = vec![(16u8, vec![1u8; 4]), (32u8, vec![2u8; 4])];
    let mut bytes = group_bytes(&images);
    bytes[4] = 3;

    assert!(matches!(
        GroupIconDirectory::parse(&bytes),
        Err(Error::MalformedResource(_))
    ));
}

#[test]
fn extract_from_memory_resources() {
    let images = vec![(16u8, vec![1u8; 4]), (48u8, vec![2u8; 6])];
    let mut resources = MemoryResources::new();
    resources.insert_group("APP", group_bytes(&images));
    for (i, (_, payload)) in images.iter().enumerate() {
        resources.insert_icon(i as u16 + 1, payload.clone());
    }

    let icons = IconExtractor::new(&resources).extract_all().unwrap();
    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].name, ResourceName::from("APP"));
    assert_eq!(icons[0].result.as_ref().unwrap(), &build_icon(&images));
}

#[test]
fn written_icon_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon0.ico");
    let icon = build_icon(&[(16, vec![7u8; 10]), (32, vec![9u8; 20])]);

    std::fs::write(&path, icon.as_bytes()).unwrap();
    let loaded = IcoContainer::parse(std::fs::read(&path).unwrap()).unwrap();

    assert_eq!(loaded, icon);
    assert_eq!(loaded.split().unwrap().len(), 2);
}

#[test]
fn parse_rejects_out_of_range_payload() {
    let mut bytes = build_icon(&[(16, vec![7u8; 10])]).into_bytes();
    bytes.truncate(bytes.len() - 1);
    assert!(matches!(
        IcoContainer::parse(bytes),
        Err(Error::MalformedResource(_))
    ));
}

#[test]
fn empty_icon_has_no_bit_depth() {
    let icon = IcoContainer::parse(vec![0, 0, 1, 0, 0, 0]).unwrap();
    assert!(icon.is_empty());
    assert!(matches!(icon.bit_depth(), Err(Error::MalformedResource(_))));
    assert!(matches!(icon.split(), Err(Error::MalformedResource(_))));
}
