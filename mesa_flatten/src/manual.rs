/*!

This is the long-form manual for `mesa_flatten` and `servel_mesas`.

## Input format

Each election round is a gzip-compressed JSON file named after the round
(`primera_vuelta.json.gz`, `segunda_vuelta.json.gz`). The content is a list of
objects, one per polling station (mesa):

```json
[
  {
    "id_region": 13, "id_cirsen": 7, "id_distrito": 8, "id_provincia": 131,
    "orden_comuna": 22, "id_comuna": 2690, "id_mesa": 40012, "mesa": "12M",
    "id_local": 1503, "orden_local": 4, "blancos": 3, "nulos": 5,
    "total_general": 58, "electores": 100,
    "candidatos": [
      {"orden_voto": 2, "votos": 30},
      {"orden_voto": 1, "votos": 20}
    ]
  }
]
```

Other fields may be present and are ignored.

### Administrative fields

The fourteen fields of [crate::STATION_FIELDS] must all be present. Their
values are copied as they are: integers, decimals, strings, booleans or null.
A list or an object in one of these fields is an error.

### Candidates

`orden_voto` is the position of the candidate on the printed ballot. It is
turned into a name with a [crate::CandidateTable]. Positions are integers: any
other value (string, decimal) is reported as an unknown position, as is any
integer that is not in the table.

Some entries (write-in placeholders) have no position. By default, such an
entry fails the station. With [crate::NullPositionPolicy::Skip] the entry is
dropped and its votes are not reported.

## Output format

One CSV file per round, comma-separated, with a header line. The first column
has an empty header and holds the 0-based position of the station in the
input. Then come the administrative fields, in the order above, and one column
per candidate, named after the candidate, in ascending ballot position.

When the stations of a round do not all have the same candidates, the columns
are the union of all the candidates, in the order in which they first appear,
and the missing cells are left empty. The two rounds are written separately:
their columns are never reconciled.

For the station above:

```text
,id_region,id_cirsen,id_distrito,id_provincia,orden_comuna,id_comuna,id_mesa,mesa,id_local,orden_local,blancos,nulos,total_general,electores,Parisi,Jara
0,13,7,8,131,22,2690,40012,12M,1503,4,3,5,58,100,20,30
```

*/
